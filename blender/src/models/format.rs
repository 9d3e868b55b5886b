use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Unknown render format: {0}")]
    InvalidInput(String),
}

// More context: https://docs.blender.org/manual/en/latest/advanced/command_line/arguments.html#format-options
// Names follow scene.render.image_settings.file_format, the old CLI spelling is accepted on parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    TGA,
    RAWTGA,
    JPEG,
    JPEG2000,
    IRIS,
    #[default]
    PNG,
    BMP,
    CINEON,
    DPX,
    EXR,
    MULTILAYER,
    HDR,
    TIFF,
    WEBP,
    // video containers, Blender writes one file for the whole range with these
    FFMPEG,
    AVIRAW,
    AVIJPEG,
}

impl Format {
    /// True when Blender would encode a movie file instead of an image sequence.
    pub fn is_video(&self) -> bool {
        matches!(self, Format::FFMPEG | Format::AVIRAW | Format::AVIJPEG)
    }

    /// FFmpeg cannot read OpenEXR frames as input.
    pub fn is_ffmpeg_compatible(&self) -> bool {
        !matches!(self, Format::EXR | Format::MULTILAYER)
    }

    /// File extension Blender appends when `-X`/use_file_extension is on.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::TGA | Format::RAWTGA => ".tga",
            Format::JPEG => ".jpg",
            Format::JPEG2000 => ".jp2",
            Format::IRIS => ".rgb",
            Format::PNG => ".png",
            Format::BMP => ".bmp",
            Format::CINEON => ".cin",
            Format::DPX => ".dpx",
            Format::EXR | Format::MULTILAYER => ".exr",
            Format::HDR => ".hdr",
            Format::TIFF => ".tif",
            Format::WEBP => ".webp",
            Format::FFMPEG => ".mp4",
            Format::AVIRAW | Format::AVIJPEG => ".avi",
        }
    }
}

impl Serialize for Format {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Format {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TGA" | "TARGA" => Ok(Format::TGA),
            "RAWTGA" | "TARGA_RAW" => Ok(Format::RAWTGA),
            "JPEG" | "JPG" => Ok(Format::JPEG),
            "JPEG2000" | "JP2" => Ok(Format::JPEG2000),
            "IRIS" => Ok(Format::IRIS),
            "PNG" => Ok(Format::PNG),
            "BMP" => Ok(Format::BMP),
            "CINEON" => Ok(Format::CINEON),
            "DPX" => Ok(Format::DPX),
            "EXR" | "OPEN_EXR" => Ok(Format::EXR),
            "MULTILAYER" | "OPEN_EXR_MULTILAYER" => Ok(Format::MULTILAYER),
            "HDR" => Ok(Format::HDR),
            "TIFF" | "TIF" => Ok(Format::TIFF),
            "WEBP" => Ok(Format::WEBP),
            "FFMPEG" => Ok(Format::FFMPEG),
            "AVIRAW" | "AVI_RAW" => Ok(Format::AVIRAW),
            "AVIJPEG" | "AVI_JPEG" => Ok(Format::AVIJPEG),
            _ => Err(FormatError::InvalidInput(s.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::TGA => "TARGA",
            Format::RAWTGA => "TARGA_RAW",
            Format::JPEG => "JPEG",
            Format::JPEG2000 => "JPEG2000",
            Format::IRIS => "IRIS",
            Format::PNG => "PNG",
            Format::BMP => "BMP",
            Format::CINEON => "CINEON",
            Format::DPX => "DPX",
            Format::EXR => "OPEN_EXR",
            Format::MULTILAYER => "OPEN_EXR_MULTILAYER",
            Format::HDR => "HDR",
            Format::TIFF => "TIFF",
            Format::WEBP => "WEBP",
            Format::FFMPEG => "FFMPEG",
            Format::AVIRAW => "AVI_RAW",
            Format::AVIJPEG => "AVI_JPEG",
        };
        f.write_str(name)
    }
}

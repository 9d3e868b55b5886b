use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

// path to config file name.
const SETTINGS_PATH: &str = "BasedPlayblast/";
const SETTINGS_FILE_NAME: &str = "CompilerConfig.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to locate the user config directory")]
    NoConfigDir,
    #[error("Unable to access config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Farm wide knobs the job settings don't carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Encoder executable, resolved on the worker.
    pub ffmpeg_exe: String,
    /// Codec part of the encoder command line. Constant quality on the GPU encoder by default.
    pub video_codec_args: Vec<String>,
    /// Extension of the preview video.
    pub video_container: String,
    /// Frame number pattern appended to generated output paths.
    pub frame_pattern: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        let codec = [
            "-c:v", "h264_nvenc", "-preset", "p5", "-rc", "vbr", "-cq", "20", "-b:v", "0", "-g",
            "18",
        ];
        Self {
            ffmpeg_exe: "ffmpeg".to_owned(),
            video_codec_args: codec.iter().map(|s| s.to_string()).collect(),
            video_container: "mp4".to_owned(),
            frame_pattern: "######".to_owned(),
        }
    }
}

impl CompilerConfig {
    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(SETTINGS_PATH).join(SETTINGS_FILE_NAME))
    }

    /// Load from the user's config directory, defaults when no file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {path:?}, using defaults");
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, data).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CompilerConfig::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, CompilerConfig::default());
    }

    #[test]
    fn save_then_load_keeps_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE_NAME);
        let mut config = CompilerConfig::default();
        config.video_container = "mov".to_owned();
        config.save_to(&path).unwrap();
        assert_eq!(CompilerConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, r#"{"ffmpeg_exe": "/opt/ffmpeg/bin/ffmpeg"}"#).unwrap();
        let config = CompilerConfig::load_from(&path).unwrap();
        assert_eq!(config.ffmpeg_exe, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.frame_pattern, "######");
    }

    #[test]
    fn broken_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            CompilerConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}

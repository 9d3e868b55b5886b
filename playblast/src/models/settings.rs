use blender::models::display_mode::DisplayMode;
use serde::{Deserialize, Serialize};

/// Settings gathered by the add-on at submission time. The compiler only reads
/// these, the resolved copy ends up in `CompiledJob`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSettings {
    /// Frames to render, e.g. `1-250` or `3, 5-10, 47`.
    pub frames: String,
    /// Maximum frames per render task.
    pub chunk_size: i64,
    /// Root directory all playblasts go under.
    pub render_output_root: String,
    /// How many parent directories of the blend file to mirror below the root.
    pub add_path_components: u32,
    /// Output template. Built from the root when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_percentage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<DisplayMode>,
    /// Blender image format name (scene.render.image_settings.file_format).
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_file_extension: Option<String>,
    pub scene: String,
    pub blendfile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    pub keep_frames: bool,
    /// Replaces the configured encoder arguments when not empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub codec_args: Vec<String>,
    /// Blender also writes JPEG previews next to the frames.
    pub has_previews: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blender_args_before: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blender_args_after: Vec<String>,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            frames: String::new(),
            chunk_size: 1,
            render_output_root: String::new(),
            add_path_components: 0,
            render_output_path: None,
            resolution_percentage: None,
            display_mode: None,
            format: String::new(),
            image_file_extension: None,
            scene: String::new(),
            blendfile: String::new(),
            fps: None,
            keep_frames: false,
            codec_args: Vec::new(),
            has_previews: false,
            blender_args_before: Vec::new(),
            blender_args_after: Vec::new(),
        }
    }
}

impl JobSettings {
    /// Frame rate usable for encoding. Zero or a non-finite value counts as unknown.
    pub fn known_fps(&self) -> Option<f64> {
        self.fps.filter(|fps| fps.is_finite() && *fps > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: JobSettings =
            serde_json::from_str(r#"{"frames": "1-10", "format": "PNG"}"#).unwrap();
        assert_eq!(settings.chunk_size, 1);
        assert!(!settings.keep_frames);
        assert_eq!(settings.fps, None);
        assert!(settings.scene.is_empty());
    }

    #[test]
    fn empty_blender_args_are_not_serialized() {
        let json = serde_json::to_value(JobSettings::default()).unwrap();
        assert!(json.get("blender_args_before").is_none());
        assert!(json.get("render_output_path").is_none());
    }

    #[test]
    fn zero_fps_is_unknown() {
        let mut settings = JobSettings::default();
        settings.fps = Some(0.0);
        assert_eq!(settings.known_fps(), None);
        settings.fps = Some(23.976);
        assert_eq!(settings.known_fps(), Some(23.976));
    }
}

use serde::{Deserialize, Serialize};

/// A single invocation inside a task. Serialized the way the farm manager
/// expects: `{"name": "blender-render", "parameters": {...}}`.
///
/// Values such as `{blender}` or `{blenderArgs}` are placeholders the worker
/// expands at run time, the compiler never touches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "parameters", rename_all = "kebab-case")]
pub enum Command {
    #[serde(rename_all = "camelCase")]
    BlenderRender {
        exe: String,
        exe_args: String,
        args_before: Vec<String>,
        blendfile: String,
        args: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    FramesToVideo {
        exe: String,
        fps: f64,
        input_glob: String,
        output_file: String,
        args: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    DeleteFrames {
        input_globs: Vec<String>,
        directory: String,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::BlenderRender { .. } => "blender-render",
            Command::FramesToVideo { .. } => "frames-to-video",
            Command::DeleteFrames { .. } => "delete-frames",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_adjacently_tagged() {
        let command = Command::DeleteFrames {
            input_globs: vec!["/out/*.jpg".to_owned(), "/out/*.exr".to_owned()],
            directory: "/out".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            json!({
                "name": "delete-frames",
                "parameters": {
                    "inputGlobs": ["/out/*.jpg", "/out/*.exr"],
                    "directory": "/out"
                }
            })
        );
        assert_eq!(command.name(), "delete-frames");
    }

    #[test]
    fn blender_render_keeps_placeholders() {
        let command = Command::BlenderRender {
            exe: "{blender}".to_owned(),
            exe_args: "{blenderArgs}".to_owned(),
            args_before: vec![],
            blendfile: "shot.blend".to_owned(),
            args: vec!["--render-frame".to_owned(), "1..5".to_owned()],
        };
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["name"], "blender-render");
        assert_eq!(value["parameters"]["exe"], "{blender}");
        assert_eq!(value["parameters"]["exeArgs"], "{blenderArgs}");
    }
}

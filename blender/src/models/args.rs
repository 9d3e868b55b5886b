use crate::models::{engine::Engine, format::Format, mode::Mode, overrides::ViewportOverrides};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ref: https://docs.blender.org/manual/en/latest/advanced/command_line/render.html
// The blend file and `-b` are not part of this list, the farm passes them separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Args {
    output: PathBuf,                     // required
    mode: Mode,                          // required
    pub scene: Option<String>,           // optional
    pub engine: Option<Engine>,          // optional
    pub format: Option<Format>,          // optional - blender keeps the file setting
    pub overrides: ViewportOverrides,    // optional
    pub extra: Vec<String>,              // optional - appended as is
}

impl Args {
    pub fn new(output: impl AsRef<Path>, mode: Mode) -> Self {
        Args {
            output: output.as_ref().to_path_buf(),
            mode,
            scene: None,
            engine: None,
            format: None,
            overrides: ViewportOverrides::default(),
            extra: Vec::new(),
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn create_arg_list(&self) -> Vec<String> {
        // More context: https://docs.blender.org/manual/en/latest/advanced/command_line/arguments.html#argument-order
        // Arguments run in order, so everything configuring the scene goes before --render-frame.
        // # is substitute to 0 pad, none will add to suffix four pounds (####)
        let mut col = Vec::new();

        if let Some(scene) = &self.scene {
            col.push("--scene".to_owned());
            col.push(scene.clone());
        }

        col.push("--render-output".to_owned());
        col.push(self.output.to_string_lossy().into_owned());

        if let Some(engine) = &self.engine {
            col.push("--engine".to_owned());
            col.push(engine.to_string());
        }

        if let Some(expr) = self.overrides.to_python_expr() {
            col.push("--python-expr".to_owned());
            col.push(expr);
        }

        if let Some(format) = &self.format {
            col.push("--render-format".to_owned());
            col.push(format.to_string());
        }

        // this argument triggers the render and must come after the scene setup
        col.push("--render-frame".to_owned());
        col.push(self.mode.to_frame_arg());

        col.extend(self.extra.iter().cloned());
        col
    }
}

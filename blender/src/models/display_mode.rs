use super::engine::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Viewport shading a playblast should look like.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisplayMode {
    Wireframe,
    Solid,
    #[default]
    Material,
    Rendered,
}

impl DisplayMode {
    /// Workbench covers the flat shading modes, anything with materials needs Eevee.
    pub fn engine(&self) -> Engine {
        match self {
            DisplayMode::Wireframe | DisplayMode::Solid => Engine::Workbench,
            DisplayMode::Material | DisplayMode::Rendered => Engine::Eevee,
        }
    }

    /// Value for `scene.display.shading.type`. Only Workbench reads it.
    pub fn shading_type(&self) -> Option<&'static str> {
        match self {
            DisplayMode::Wireframe => Some("WIREFRAME"),
            DisplayMode::Solid => Some("SOLID"),
            _ => None,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayMode::Wireframe => "WIREFRAME",
            DisplayMode::Solid => "SOLID",
            DisplayMode::Material => "MATERIAL",
            DisplayMode::Rendered => "RENDERED",
        };
        f.write_str(name)
    }
}

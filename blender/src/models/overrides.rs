use super::display_mode::DisplayMode;
use serde::{Deserialize, Serialize};

/// Scene tweaks applied through `--python-expr` before the render starts.
/// Nothing here is written back into the blend file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportOverrides {
    pub resolution_percentage: Option<u8>,
    pub display_mode: Option<DisplayMode>,
}

impl ViewportOverrides {
    pub fn is_empty(&self) -> bool {
        self.resolution_percentage.is_none() && self.display_mode.is_none()
    }

    pub fn to_python_expr(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut lines = vec![
            "import bpy".to_owned(),
            "scene = bpy.context.scene".to_owned(),
        ];
        if let Some(percentage) = self.resolution_percentage {
            lines.push(format!("scene.render.resolution_percentage = {percentage}"));
        }
        if let Some(shading) = self.display_mode.and_then(|m| m.shading_type()) {
            lines.push(format!("scene.display.shading.type = '{shading}'"));
        }
        Some(lines.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_produce_nothing() {
        assert_eq!(ViewportOverrides::default().to_python_expr(), None);
    }

    #[test]
    fn solid_mode_sets_shading_and_resolution() {
        let overrides = ViewportOverrides {
            resolution_percentage: Some(50),
            display_mode: Some(DisplayMode::Solid),
        };
        assert_eq!(
            overrides.to_python_expr().unwrap(),
            "import bpy; scene = bpy.context.scene; scene.render.resolution_percentage = 50; scene.display.shading.type = 'SOLID'"
        );
    }

    #[test]
    fn material_mode_leaves_shading_alone() {
        let overrides = ViewportOverrides {
            resolution_percentage: None,
            display_mode: Some(DisplayMode::Material),
        };
        let expr = overrides.to_python_expr().unwrap();
        assert!(!expr.contains("shading"));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

// context for serde: https://serde.rs/enum-representations.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    // JSON: "Frame": "i32",
    Frame(i32),

    // JSON: "Section": {"start":"i32", "end":"i32"}, both ends inclusive
    Section { start: i32, end: i32 },
}

impl Mode {
    /// Frame argument in Blender's own notation, e.g. `1..5` for `--render-frame`.
    pub fn to_frame_arg(&self) -> String {
        match self {
            Mode::Frame(frame) => frame.to_string(),
            Mode::Section { start, end } => format!("{start}..{end}"),
        }
    }
}

// Farm-facing token, `10` or `10-15`.
impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Frame(frame) => write!(f, "{frame}"),
            Mode::Section { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_uses_double_dot_for_blender() {
        let mode = Mode::Section { start: 10, end: 15 };
        assert_eq!(mode.to_string(), "10-15");
        assert_eq!(mode.to_frame_arg(), "10..15");
        assert_eq!(Mode::Frame(7).to_frame_arg(), "7");
    }
}

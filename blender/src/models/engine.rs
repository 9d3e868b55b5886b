use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Copy, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Engine {
    Cycles,
    #[default]
    Eevee,
    Workbench,
}

// Values accepted by `--engine`, see `blender --engine help`.
impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Cycles => f.write_str("CYCLES"),
            Engine::Eevee => f.write_str("BLENDER_EEVEE_NEXT"),
            Engine::Workbench => f.write_str("BLENDER_WORKBENCH"),
        }
    }
}

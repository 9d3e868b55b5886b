// Blender command line arguments and the settings that feed them.
pub mod models;

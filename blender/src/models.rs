pub mod args;
pub mod display_mode;
pub mod engine;
pub mod format;
pub mod mode;
pub mod overrides;

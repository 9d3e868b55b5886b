pub mod chunker;
pub mod cleanup;
pub mod cli_app;
pub mod compiler;
pub mod template;

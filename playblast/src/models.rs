pub mod chunk;
pub mod command;
pub mod compiled_job;
pub mod error;
pub mod graph;
pub mod job;
pub mod settings;
pub mod task;

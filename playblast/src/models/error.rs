use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that stops a job from compiling. No partial graph is ever
/// returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum CompileError {
    #[error("Invalid frame range {range:?}: {reason}")]
    InvalidRange { range: String, reason: String },
    #[error("Chunk size must be at least 1, got {0}")]
    InvalidChunkSize(i64),
    #[error("This job type only renders images, and not \"{0}\"")]
    UnsupportedFormat(String),
    #[error("Missing required setting: {0}")]
    MissingSetting(String),
    #[error("Invalid value for {name}: {reason}")]
    InvalidSetting { name: String, reason: String },
    #[error("Task name {0:?} is used more than once")]
    DuplicateTask(String),
    #[error("Task {task:?} depends on unknown task {dependency:?}")]
    UnknownDependency { task: String, dependency: String },
}

impl CompileError {
    pub(crate) fn invalid_range(range: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            range: range.to_owned(),
            reason: reason.into(),
        }
    }
}

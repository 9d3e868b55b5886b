use super::{graph::TaskGraph, settings::JobSettings};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of compiling a job: what gets submitted to the scheduler.
///
/// `settings` is a copy of the submitted settings with `render_output_path`
/// replaced by the concrete path, so inspecting the job later shows where the
/// frames actually went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledJob {
    pub job_id: Uuid,
    pub name: String,
    pub render_output_path: String,
    pub settings: JobSettings,
    pub tasks: TaskGraph,
}

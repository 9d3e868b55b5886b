use super::settings::JobSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use uuid::Uuid;

// A job is what the submitter hands to the farm. The compiler derives the
// individual tasks from it based on chunk size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier
    pub id: Uuid,
    /// Human readable name, also used as an output directory.
    pub name: String,
    /// Submission time. Every `{timestamp}` in the output path resolves from this.
    pub created: DateTime<Utc>,
    pub settings: JobSettings,
}

impl Job {
    /// Create a job with all information provided, e.g. when replaying a stored submission.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        created: DateTime<Utc>,
        settings: JobSettings,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            created,
            settings,
        }
    }
}

impl AsRef<Uuid> for Job {
    fn as_ref(&self) -> &Uuid {
        &self.id
    }
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Job {}

impl Hash for Job {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

use crate::models::job::Job;

/// Resolves one `{name}` placeholder in an output path template.
///
/// Handlers only see job metadata, so resolving the same template for the
/// same job twice gives the same string.
pub trait TokenHandler: Send + Sync {
    fn resolve(&self, job: &Job) -> String;
}

impl<F> TokenHandler for F
where
    F: Fn(&Job) -> String + Send + Sync,
{
    fn resolve(&self, job: &Job) -> String {
        self(job)
    }
}

use crate::domains::token_handler::TokenHandler;
use crate::models::job::Job;
use chrono::Local;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Local time, e.g. `2024-05-01_134502`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// Job creation time in the local time zone.
pub struct TimestampToken;

impl TokenHandler for TimestampToken {
    fn resolve(&self, job: &Job) -> String {
        job.created
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }
}

/// Lookup table of `{token}` handlers for output path templates.
/// Placeholders without a handler are left as they are.
pub struct TemplateResolver {
    handlers: HashMap<String, Box<dyn TokenHandler>>,
    pattern: Regex,
}

impl TemplateResolver {
    /// Resolver with no tokens registered.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
            pattern: Regex::new(r"\{([^{}]+)\}").expect("token pattern is a valid regex"),
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl TokenHandler + 'static,
    ) -> &mut Self {
        self.handlers.insert(name.into(), Box::new(handler));
        self
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn resolve(&self, template: &str, job: &Job) -> String {
        self.pattern
            .replace_all(template, |caps: &Captures| match self.handlers.get(&caps[1]) {
                Some(handler) => handler.resolve(job),
                None => caps[0].to_owned(),
            })
            .into_owned()
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        let mut resolver = Self::empty();
        resolver.register("timestamp", TimestampToken);
        resolver
    }
}

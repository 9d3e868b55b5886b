/*
    Worker side of the `delete-frames` command.
    Removes the rendered frames once the preview video exists, then the
    directory they were in. A frame that can't be deleted is logged and
    reported, it never stops the rest of the cleanup.
*/
use regex::Regex;
use serde::Serialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("Glob {0:?} has no file name pattern")]
    InvalidGlob(String),
    #[error("Unable to read directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DeletionOutcome {
    Deleted(PathBuf),
    Failed { path: PathBuf, reason: String },
}

impl DeletionOutcome {
    pub fn path(&self) -> &Path {
        match self {
            DeletionOutcome::Deleted(path) => path,
            DeletionOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, DeletionOutcome::Deleted(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DirectoryOutcome {
    Removed,
    /// Something other than the matched frames is still in there.
    NotEmpty { remaining: usize },
    Missing,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub deletions: Vec<DeletionOutcome>,
    pub directory: PathBuf,
    pub directory_outcome: DirectoryOutcome,
}

impl CleanupReport {
    pub fn deleted_count(&self) -> usize {
        self.deletions.iter().filter(|d| d.is_deleted()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeletionOutcome> {
        self.deletions.iter().filter(|d| !d.is_deleted())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Every matched frame deleted and the directory gone.
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0 && self.directory_outcome == DirectoryOutcome::Removed
    }
}

// `*` and `?` in the file name part only, like the globs the compiler emits.
fn file_name_matcher(pattern: &str) -> Regex {
    let mut expr = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            c => expr.push_str(&regex::escape(&c.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr).expect("escaped glob is a valid regex")
}

/// Delete every file matching one of `input_globs`, then remove `directory` if it ended up empty.
pub fn cleanup_frames<S: AsRef<str>>(
    input_globs: &[S],
    directory: &Path,
) -> Result<CleanupReport, CleanupError> {
    cleanup_frames_with(input_globs, directory, |path| fs::remove_file(path))
}

/// Same as [`cleanup_frames`] with the per-file removal supplied by the caller.
pub fn cleanup_frames_with<S, F>(
    input_globs: &[S],
    directory: &Path,
    remove: F,
) -> Result<CleanupReport, CleanupError>
where
    S: AsRef<str>,
    F: Fn(&Path) -> io::Result<()>,
{
    let mut matches = Vec::new();
    for input_glob in input_globs {
        let found = matching_files(input_glob.as_ref())?;
        info!("Deleting {} frames matching {}", found.len(), input_glob.as_ref());
        matches.extend(found);
    }
    matches.sort();
    matches.dedup();

    let deletions: Vec<DeletionOutcome> = matches
        .into_iter()
        .map(|path| match remove(&path) {
            Ok(()) => {
                debug!("Deleted {path:?}");
                DeletionOutcome::Deleted(path)
            }
            Err(e) => {
                warn!("Unable to delete {path:?}: {e}");
                DeletionOutcome::Failed {
                    path,
                    reason: e.to_string(),
                }
            }
        })
        .collect();

    let directory_outcome = remove_empty_dir(directory);
    Ok(CleanupReport {
        deletions,
        directory: directory.to_path_buf(),
        directory_outcome,
    })
}

fn matching_files(input_glob: &str) -> Result<Vec<PathBuf>, CleanupError> {
    let glob = Path::new(input_glob);
    let pattern = glob
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CleanupError::InvalidGlob(input_glob.to_owned()))?;
    let search_dir = match glob.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let matcher = file_name_matcher(pattern);

    let entries = fs::read_dir(search_dir).map_err(|source| CleanupError::ReadDir {
        path: search_dir.to_path_buf(),
        source,
    })?;

    Ok(entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry in {search_dir:?}: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| matcher.is_match(name))
        })
        .map(|entry| entry.path())
        .collect())
}

fn remove_empty_dir(directory: &Path) -> DirectoryOutcome {
    let remaining = match fs::read_dir(directory) {
        Ok(entries) => entries.count(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Output directory {directory:?} is already gone");
            return DirectoryOutcome::Missing;
        }
        Err(e) => {
            warn!("Unable to inspect {directory:?}: {e}");
            return DirectoryOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    if remaining > 0 {
        warn!("Leaving {directory:?} in place, {remaining} entries left");
        return DirectoryOutcome::NotEmpty { remaining };
    }

    match fs::remove_dir(directory) {
        Ok(()) => {
            info!("Removed output directory {directory:?}");
            DirectoryOutcome::Removed
        }
        Err(e) => {
            warn!("Unable to remove {directory:?}: {e}");
            DirectoryOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

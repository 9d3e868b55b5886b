use super::{chunker, cleanup, compiler::JobCompiler};
use crate::{
    config::CompilerConfig,
    models::{job::Job, settings::JobSettings},
};
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};
use uuid::Uuid;

fn config_path(custom: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match custom {
        Some(path) => Ok(path),
        None => Ok(CompilerConfig::get_config_path()?),
    }
}

fn load_config(custom: Option<PathBuf>) -> anyhow::Result<CompilerConfig> {
    let path = config_path(custom)?;
    CompilerConfig::load_from(&path).context("Unable to load compiler config")
}

fn parse_created(created: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match created {
        Some(value) => Ok(DateTime::parse_from_rfc3339(value)
            .with_context(|| format!("Invalid creation time {value:?}, expected RFC 3339"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

// fall back on the blend file name, same as the add-on does for its output
fn default_job_name(settings: &JobSettings) -> String {
    Path::new(&settings.blendfile)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "playblast".to_owned())
}

pub fn compile(
    settings_path: &Path,
    name: Option<String>,
    created: Option<&str>,
    config: Option<PathBuf>,
    compact: bool,
) -> anyhow::Result<()> {
    let data = fs::read_to_string(settings_path)
        .with_context(|| format!("Unable to read settings file {settings_path:?}"))?;
    let settings: JobSettings = serde_json::from_str(&data)
        .with_context(|| format!("Unable to parse settings file {settings_path:?}"))?;

    let name = name.unwrap_or_else(|| default_job_name(&settings));
    let job = Job::new(Uuid::new_v4(), name, parse_created(created)?, settings);

    let compiler = JobCompiler::new(load_config(config)?);
    let compiled = compiler
        .compile(&job)
        .with_context(|| format!("Job {} was not submitted", job.name))?;

    let output = if compact {
        serde_json::to_string(&compiled)?
    } else {
        serde_json::to_string_pretty(&compiled)?
    };
    println!("{output}");
    Ok(())
}

pub fn frames(range: &str, chunk_size: i64) -> anyhow::Result<()> {
    let chunks = chunker::chunk_frames(range, chunk_size)?;
    for chunk in &chunks {
        println!("{chunk}");
    }
    println!("{} chunks, display range {}", chunks.len(), chunker::display_range(range)?);
    Ok(())
}

pub fn cleanup(input_globs: &[String], directory: &Path) -> anyhow::Result<()> {
    let report = cleanup::cleanup_frames(input_globs, directory)?;
    info!(
        "Deleted {} frames, {} failures, directory: {:?}",
        report.deleted_count(),
        report.failed_count(),
        report.directory_outcome
    );

    if report.failed_count() > 0 {
        for failure in report.failures() {
            warn!("Not deleted: {:?}", failure.path());
        }
        bail!("{} frames could not be deleted", report.failed_count());
    }
    Ok(())
}

pub fn config_init(custom: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = config_path(custom)?;
    if path.exists() && !force {
        bail!("Config {path:?} already exists, pass --force to overwrite");
    }
    CompilerConfig::default().save_to(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

pub fn config_show(custom: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(custom)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_name_comes_from_blend_file() {
        let settings = JobSettings {
            blendfile: "/projects/shot010.blend".to_owned(),
            ..Default::default()
        };
        assert_eq!(default_job_name(&settings), "shot010");
        assert_eq!(default_job_name(&JobSettings::default()), "playblast");
    }

    #[test]
    fn created_accepts_rfc3339_with_offset() {
        let created = parse_created(Some("2024-05-01T15:45:02+02:00")).unwrap();
        assert_eq!(created.to_rfc3339(), "2024-05-01T13:45:02+00:00");
        assert!(parse_created(Some("yesterday")).is_err());
    }
}

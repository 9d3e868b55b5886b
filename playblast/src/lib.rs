/*
Developer notes:
- The add-on itself lives inside Blender and only gathers settings. Everything that
    happens after "submit" is in this crate: frame chunking, building the task graph for the
    farm manager, and the worker side cleanup once the preview video exists.
- Compilation stays free of I/O so the graph can be checked in tests without a farm.
    Config loading and file deletion live at the edges (config.rs, services/cleanup.rs).
*/
use clap::{Parser, Subcommand};
use services::cli_app;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod domains;
pub mod models;
pub mod services;

pub use models::{compiled_job::CompiledJob, error::CompileError, job::Job, settings::JobSettings};
pub use services::compiler::{compile, JobCompiler};

#[derive(Parser)]
#[command(
    name = "playblast",
    about = "Compile BasedPlayblast settings into a render farm task graph",
    version
)]
struct Cli {
    /// Enable debug logging, RUST_LOG still takes precedence
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the one in the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a settings file and print the job as JSON
    Compile {
        /// JSON file with the job settings
        settings: PathBuf,

        /// Job name, defaults to the blend file name
        #[arg(short, long)]
        name: Option<String>,

        /// Job creation time (RFC 3339), defaults to now
        #[arg(long)]
        created: Option<String>,

        /// Print the JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Show how a frame range gets chunked
    Frames {
        range: String,

        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        chunk_size: i64,
    },

    /// Delete rendered frames and their directory
    Cleanup {
        /// Output directory, removed once empty
        directory: PathBuf,

        /// e.g. /render/shot010/2024-05-01_134502/*.png
        #[arg(required = true)]
        input_globs: Vec<String>,
    },

    /// Manage the compiler config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config in use
    Show,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let config_path = cli.config;
    match cli.command {
        Commands::Compile {
            settings,
            name,
            created,
            compact,
        } => cli_app::compile(&settings, name, created.as_deref(), config_path, compact),
        Commands::Frames { range, chunk_size } => cli_app::frames(&range, chunk_size),
        Commands::Cleanup {
            directory,
            input_globs,
        } => cli_app::cleanup(&input_globs, &directory),
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => cli_app::config_init(config_path, force),
            ConfigAction::Show => cli_app::config_show(config_path),
        },
    }
}

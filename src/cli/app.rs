//! CLI definitions and entry point

use std::path::PathBuf;

use clap::Parser;

use super::commands::{self, ScanArgs};
use taskpack::output::OutputMode;

/// taskpack - Package statically discovered task definitions
#[derive(Parser, Debug)]
#[command(
    name = "taskpack",
    version,
    about = "Package statically discovered task definitions",
    long_about = "Find @task-decorated Python functions without running them.\n\n\
                  Each task's decorator configuration becomes a binary record, and the\n\
                  records are packaged with a snapshot of the source tree."
)]
pub struct Cli {
    /// Directory to scan
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Base image for every task, replacing the configured one
    #[arg(short, long)]
    pub image: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output archive path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Package after every file instead of once per scan
    #[arg(long)]
    pub per_file: bool,

    /// Apply ignore rules from parent directories too
    #[arg(long)]
    pub inherit_ignore: bool,

    /// Extract and report without writing an archive
    #[arg(long)]
    pub dry_run: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long)]
    pub json: bool,
}

impl From<Cli> for ScanArgs {
    fn from(cli: Cli) -> Self {
        Self {
            dir: cli.dir,
            image: cli.image,
            output: cli.output,
            per_file: cli.per_file,
            inherit_ignore: cli.inherit_ignore,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        }
    }
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    commands::scan(&ScanArgs::from(cli), output_mode)
}

//! Scan a directory and write the package

use std::path::PathBuf;

use anyhow::Context;

use taskpack::adapters::LogReporter;
use taskpack::output::OutputMode;
use taskpack::{Config, PackageMode, Scanner};

/// Arguments to the scan command
#[derive(Debug, Clone, Default)]
pub struct ScanArgs {
    /// Directory to scan
    pub dir: PathBuf,
    /// Base image override
    pub image: Option<String>,
    /// Output archive override
    pub output: Option<PathBuf>,
    /// Force per-file packaging
    pub per_file: bool,
    /// Force ignore-rule inheritance
    pub inherit_ignore: bool,
    /// Skip writing the archive
    pub dry_run: bool,
    /// Debug-level diagnostics
    pub verbose: bool,
}

impl ScanArgs {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply(&self, config: &mut Config) {
        if let Some(image) = &self.image {
            config.package.base_image = Some(image.clone());
        }
        if let Some(output) = &self.output {
            config.package.output.clone_from(output);
        }
        if self.per_file {
            config.package.mode = PackageMode::PerFile;
        }
        if self.inherit_ignore {
            config.package.inherit_ignore_rules = true;
        }
    }
}

/// Scan `args.dir`, package what was found and print a report
pub fn scan(args: &ScanArgs, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = Config::load(&args.dir)
        .with_context(|| format!("failed to load configuration for {}", args.dir.display()))?;
    args.apply(&mut config);

    let reporter = LogReporter::from_verbosity(args.verbose);
    let report = Scanner::new(config, &reporter)
        .dry_run(args.dry_run)
        .scan(&args.dir)
        .with_context(|| format!("failed to scan {}", args.dir.display()))?;

    report.render(mode);
    Ok(())
}

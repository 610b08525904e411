//! Output formatting for human and JSON modes
//!
//! A scan produces a [`ScanReport`] that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;

use crate::adapters::PackageSummary;
use crate::config::PackageMode;
use crate::core::models::{MalformedDecorator, MarkerKind};
use crate::core::services::{DescriptorSet, SourcedDescriptor};
use crate::error::Error;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Pipeline stage a file failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Reading the file
    Read,
    /// Parsing the file
    Parse,
    /// Packaging after the file (per-file mode)
    Package,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Parse => write!(f, "parse"),
            Self::Package => write!(f, "package"),
        }
    }
}

/// A file that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    /// The file
    pub path: PathBuf,
    /// Where it failed
    pub stage: Stage,
    /// Error message
    pub message: String,
}

impl FileFailure {
    /// Record a failure for `path`
    #[must_use]
    pub fn new(path: &Path, stage: Stage, error: &Error) -> Self {
        Self {
            path: path.to_path_buf(),
            stage,
            message: error.to_string(),
        }
    }
}

/// A malformed marker decorator and the file it was found in
#[derive(Debug, Clone, Serialize)]
pub struct MalformedReport {
    /// Source file
    pub path: PathBuf,
    /// The decorator
    #[serde(flatten)]
    pub decorator: MalformedDecorator,
}

/// Result of a scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Scanned directory
    pub root: PathBuf,
    /// Packaging mode used
    pub mode: PackageMode,
    /// Whether packaging was skipped
    pub dry_run: bool,
    /// Number of candidate source files
    pub files_scanned: usize,
    /// Retained descriptors in package order
    pub descriptors: Vec<SourcedDescriptor>,
    /// Descriptors recognized but not retained
    pub dropped: usize,
    /// Marker decorators absorbed as malformed
    pub malformed: Vec<MalformedReport>,
    /// Files that failed
    pub failures: Vec<FileFailure>,
    /// The archive written last, if any
    pub archive: Option<PackageSummary>,
}

impl ScanReport {
    /// Create an empty report
    #[must_use]
    pub fn new(root: &Path, mode: PackageMode, dry_run: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            mode,
            dry_run,
            files_scanned: 0,
            descriptors: Vec::new(),
            dropped: 0,
            malformed: Vec::new(),
            failures: Vec::new(),
            archive: None,
        }
    }

    /// Append an aggregated descriptor set
    pub fn absorb(&mut self, set: &DescriptorSet) {
        self.descriptors.extend(set.iter().cloned());
        self.dropped += set.dropped();
    }

    /// Number of retained task descriptors
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.descriptors.iter().filter(|d| d.descriptor.kind == MarkerKind::Task).count()
    }

    /// Check whether every file was processed
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("Scanned {} file(s) in {}", self.files_scanned, self.root.display());

        if self.descriptors.is_empty() {
            println!("No tasks found.");
        } else {
            println!("\n{}", "Tasks:".bold());
            for d in &self.descriptors {
                let kind = match d.descriptor.kind {
                    MarkerKind::Task => String::new(),
                    kind => format!(" [{kind}]"),
                };
                println!(
                    "  {}{}  ({}:{})",
                    d.descriptor.name.green(),
                    kind,
                    d.source.display(),
                    d.descriptor.line
                );
            }
        }

        if self.dropped > 0 {
            println!("\n{} workflow definition(s) not packaged.", self.dropped);
        }

        if !self.malformed.is_empty() {
            println!("\n{}", "Malformed decorators:".yellow());
            for m in &self.malformed {
                println!("  {}: {}", m.path.display(), m.decorator);
            }
        }

        if !self.failures.is_empty() {
            println!("\n{}", "Failures:".red());
            for f in &self.failures {
                println!("  [{}] {}", f.stage, f.path.display());
                println!("          {}", f.message);
            }
        }

        println!();
        match &self.archive {
            Some(archive) => println!(
                "Package: {} ({} record(s), {} file(s), {} ignored)",
                archive.output.display(),
                archive.records,
                archive.files.len(),
                archive.ignored.len()
            ),
            None if self.dry_run => println!("Dry run: no package written."),
            None => println!("No package written."),
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

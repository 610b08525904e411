//! Scan driver
//!
//! Runs discovery, extraction, aggregation and packaging over a directory.
//! Files are processed one at a time in discovery order. A file that cannot
//! be read or parsed is reported and skipped; the rest of the scan goes on.
//!
//! In [`PackageMode::Aggregate`] every file is extracted first and the scan
//! root is packaged once. In [`PackageMode::PerFile`] the archive is rewritten
//! after each file from that file's descriptors and directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::{PackageOptions, Packager, find_source_files};
use crate::config::{Config, PackageMode};
use crate::core::models::{MarkerKind, TaskDescriptor};
use crate::core::ports::Reporter;
use crate::core::services::{DescriptorSet, Extraction, extract_descriptors};
use crate::error::{Error, Result};
use crate::output::{FileFailure, MalformedReport, ScanReport, Stage};
use crate::parser::ParserRegistry;

/// Drives a scan with a fixed configuration
pub struct Scanner<'a> {
    config: Config,
    registry: ParserRegistry,
    reporter: &'a dyn Reporter,
    dry_run: bool,
}

impl std::fmt::Debug for Scanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl<'a> Scanner<'a> {
    /// Create a scanner with the built-in parsers
    #[must_use]
    pub fn new(config: Config, reporter: &'a dyn Reporter) -> Self {
        Self {
            config,
            registry: ParserRegistry::new(),
            reporter,
            dry_run: false,
        }
    }

    /// Extract and report without writing an archive
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Discover source files under `root` and process them
    ///
    /// # Errors
    ///
    /// Fails if `root` is not a directory, or if the single aggregate
    /// packaging pass fails. Per-file failures are collected in the report.
    pub fn scan(&self, root: &Path) -> Result<ScanReport> {
        self.reporter.info(&format!("Searching {}", root.display()));
        let files = find_source_files(root, &self.config.scan, self.reporter)?;
        self.reporter.info(&format!("Found {} file(s)", files.len()));
        self.scan_files(root, &files)
    }

    /// Process an explicit list of files; `root` is what aggregate mode
    /// archives
    ///
    /// # Errors
    ///
    /// Fails only if the aggregate packaging pass fails.
    pub fn scan_files(&self, root: &Path, files: &[PathBuf]) -> Result<ScanReport> {
        let mode = self.config.package.mode;
        let mut report = ScanReport::new(root, mode, self.dry_run);
        let packager = Packager::new(PackageOptions::from(&self.config.package), self.reporter);
        let mut aggregate = self.descriptor_set();

        for path in files {
            report.files_scanned += 1;

            let extraction = match self.extract_file(path) {
                Ok(extraction) => extraction,
                Err(e) => {
                    let stage = match e {
                        Error::Parse { .. } => Stage::Parse,
                        _ => Stage::Read,
                    };
                    self.reporter.error(&format!("Error processing {}: {e}", path.display()));
                    report.failures.push(FileFailure::new(path, stage, &e));
                    continue;
                },
            };

            report.malformed.extend(extraction.malformed.into_iter().map(|decorator| {
                MalformedReport {
                    path: path.clone(),
                    decorator,
                }
            }));

            match mode {
                PackageMode::Aggregate => {
                    aggregate.extend(path, extraction.descriptors);
                },
                PackageMode::PerFile => {
                    let mut set = self.descriptor_set();
                    set.extend(path, extraction.descriptors);
                    if !self.dry_run {
                        match packager.package(descriptors(&set), parent_dir(path)) {
                            Ok(summary) => report.archive = Some(summary),
                            Err(e) => {
                                self.reporter
                                    .error(&format!("Error packaging {}: {e}", path.display()));
                                report.failures.push(FileFailure::new(path, Stage::Package, &e));
                            },
                        }
                    }
                    report.absorb(&set);
                },
            }
        }

        if mode == PackageMode::Aggregate {
            if !self.dry_run && !files.is_empty() {
                report.archive = Some(packager.package(descriptors(&aggregate), root)?);
            }
            report.absorb(&aggregate);
        }

        Ok(report)
    }

    /// Read, parse and extract one file
    ///
    /// A file with no registered parser yields nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Parse`]
    /// if it is not valid source.
    pub fn extract_file(&self, path: &Path) -> Result<Extraction> {
        self.reporter.info(&format!("Processing {}", path.display()));

        let Some(parser) = self.registry.parser_for(path) else {
            self.reporter.warn(&format!("No parser for {}, skipping", path.display()));
            return Ok(Extraction::default());
        };

        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let module = parser.parse(&source).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let extraction = extract_descriptors(&module, &self.config.scan.markers);

        let tasks = extraction.descriptors.iter().filter(|d| d.kind == MarkerKind::Task).count();
        self.reporter.info(&format!("Found {tasks} task(s) in {}", path.display()));
        for descriptor in &extraction.descriptors {
            self.describe(descriptor);
        }
        for malformed in &extraction.malformed {
            self.reporter.warn(&format!("{}: malformed decorator {malformed}", path.display()));
        }

        Ok(extraction)
    }

    fn descriptor_set(&self) -> DescriptorSet {
        DescriptorSet::retaining(self.config.retained_kinds())
    }

    fn describe(&self, descriptor: &TaskDescriptor) {
        if !self.reporter.enabled(log::Level::Debug) {
            return;
        }
        let config: Vec<String> =
            descriptor.config.iter().map(|(k, v)| format!("{k}={}", v.repr())).collect();
        let inputs: Vec<String> = descriptor
            .inputs
            .iter()
            .map(|p| match &p.annotation {
                Some(annotation) => format!("{}: {annotation}", p.name),
                None => p.name.clone(),
            })
            .collect();
        let output = descriptor.output.as_ref().map_or_else(|| "None".to_string(), ToString::to_string);

        self.reporter.debug(&format!("{} {}", descriptor.kind, descriptor.name));
        self.reporter.debug(&format!("  config: {}", config.join(", ")));
        self.reporter.debug(&format!("  input: ({})", inputs.join(", ")));
        self.reporter.debug(&format!("  output: {output}"));
    }
}

fn descriptors(set: &DescriptorSet) -> impl Iterator<Item = &TaskDescriptor> {
    set.iter().map(|d| &d.descriptor)
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."))
}

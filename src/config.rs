//! Configuration management
//!
//! Settings are read from `taskpack.toml` in the scanned directory. When that
//! file is absent, the user-level `~/.taskpack/config.toml` is used, and
//! failing that the built-in defaults. Command-line flags are applied on top
//! by the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::models::{MarkerKind, MarkerSet};
use crate::error::{Error, Result};
use crate::paths;

/// Complete taskpack configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// What to look for
    #[serde(default)]
    pub scan: ScanConfig,
    /// How to package what was found
    #[serde(default)]
    pub package: PackageConfig,
}

/// Discovery and extraction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Source file extensions to scan (without the dot)
    pub extensions: Vec<String>,
    /// Decorator names and the kind each declares
    pub markers: MarkerSet,
    /// Keep workflow descriptors in the package as well as tasks
    pub retain_workflows: bool,
}

impl ScanConfig {
    /// Check whether a path has one of the scanned extensions
    #[must_use]
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x == ext))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["py".to_string()],
            markers: MarkerSet::default(),
            retain_workflows: false,
        }
    }
}

/// When packaging happens relative to extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageMode {
    /// Extract every file, then package the scan root once
    #[default]
    Aggregate,
    /// Package after each file, archiving that file's directory; the last
    /// file processed determines the final archive
    PerFile,
}

impl std::fmt::Display for PackageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aggregate => write!(f, "aggregate"),
            Self::PerFile => write!(f, "per-file"),
        }
    }
}

/// Archive settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Output archive path, relative to the working directory
    pub output: PathBuf,
    /// Replaces every task's configured base image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_image: Option<String>,
    /// Packaging mode
    pub mode: PackageMode,
    /// Name of the per-directory ignore file
    pub ignore_file: String,
    /// Also apply ignore rules from ancestor directories
    pub inherit_ignore_rules: bool,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(paths::PACKAGE_FILE),
            base_image: None,
            mode: PackageMode::default(),
            ignore_file: paths::IGNORE_FILE.to_string(),
            inherit_ignore_rules: false,
        }
    }
}

impl Config {
    /// Load configuration for a scan rooted at `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load(dir: &Path) -> Result<Self> {
        let project = paths::project_config(dir);
        if project.is_file() {
            return Self::load_file(&project);
        }

        let global = paths::global_config();
        if global.is_file() {
            return Self::load_file(&global);
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Marker kinds carried into the package
    #[must_use]
    pub fn retained_kinds(&self) -> Vec<MarkerKind> {
        if self.scan.retain_workflows {
            vec![MarkerKind::Task, MarkerKind::Workflow]
        } else {
            vec![MarkerKind::Task]
        }
    }
}

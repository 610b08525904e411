//! Source file discovery
//!
//! Recursive walk of a root directory in a stable (name-sorted) order,
//! keeping files (or links to files) whose extension is in the configured set.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::core::ports::Reporter;
use crate::error::{Error, Result};

/// Find every source file below `root`
///
/// Entries that cannot be read are reported and skipped; only a missing or
/// non-directory root is an error.
pub fn find_source_files(
    root: &Path,
    scan: &ScanConfig,
    reporter: &dyn Reporter,
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::RootNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                reporter.warn(&format!("Skipping unreadable entry: {e}"));
                continue;
            },
        };
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && scan.is_source_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

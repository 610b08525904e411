//! Package archive writer
//!
//! A package is a gzip-compressed tar holding one `task_<i>.pb` protobuf
//! record per descriptor and `code.tar.gz`, a filtered snapshot of the
//! archived directory. Records and the snapshot are staged in a temporary
//! directory that is removed on every exit path; the package itself is
//! written to a temporary file beside the output and renamed into place.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::{self, File};
use std::io;
use std::iter;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use tar::Builder;
use tempfile::{NamedTempFile, TempDir};
use walkdir::WalkDir;

use crate::config::PackageConfig;
use crate::core::models::{IgnoreRuleSet, TaskDescriptor, TaskRecord};
use crate::core::ports::Reporter;
use crate::error::{Error, Result};
use crate::paths;

/// Settings for one packaging pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOptions {
    /// Where the package is written
    pub output: PathBuf,
    /// Replaces every record's base image when set
    pub base_image: Option<String>,
    /// Name of the per-directory ignore file
    pub ignore_file: String,
    /// Apply ancestor directories' rules as well as the file's own directory
    pub inherit_ignore_rules: bool,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self::from(&PackageConfig::default())
    }
}

impl From<&PackageConfig> for PackageOptions {
    fn from(config: &PackageConfig) -> Self {
        Self {
            output: config.output.clone(),
            base_image: config.base_image.clone(),
            ignore_file: config.ignore_file.clone(),
            inherit_ignore_rules: config.inherit_ignore_rules,
        }
    }
}

/// What a packaging pass wrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    /// Package path
    pub output: PathBuf,
    /// Directory snapshotted into `code.tar.gz`
    pub tree_root: PathBuf,
    /// Number of task records
    pub records: usize,
    /// Snapshot entry names, sorted
    pub files: Vec<String>,
    /// Paths left out by ignore rules
    pub ignored: Vec<String>,
}

/// Writes package archives
pub struct Packager<'a> {
    options: PackageOptions,
    reporter: &'a dyn Reporter,
}

impl std::fmt::Debug for Packager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packager").field("options", &self.options).finish_non_exhaustive()
    }
}

impl<'a> Packager<'a> {
    /// Create a packager
    #[must_use]
    pub fn new(options: PackageOptions, reporter: &'a dyn Reporter) -> Self {
        Self { options, reporter }
    }

    /// Serialize `descriptors` and snapshot `tree_root` into the output
    /// archive, replacing any previous one
    ///
    /// # Errors
    ///
    /// Any I/O failure aborts the pass. The previous archive, if any, is left
    /// untouched in that case.
    pub fn package<'d>(
        &self,
        descriptors: impl IntoIterator<Item = &'d TaskDescriptor>,
        tree_root: &Path,
    ) -> Result<PackageSummary> {
        let staging = TempDir::new().map_err(|e| Error::io(std::env::temp_dir(), e))?;

        let records = self.write_records(descriptors, staging.path())?;
        let tree = self.collect_tree(tree_root)?;
        let code = staging.path().join(paths::CODE_ARCHIVE);
        write_tree_archive(&code, &tree.files)?;
        self.write_package(&records, &code)?;

        self.reporter.info(&format!(
            "Stored {} task(s) and {} file(s) in {}",
            records.len(),
            tree.files.len(),
            self.options.output.display()
        ));

        Ok(PackageSummary {
            output: self.options.output.clone(),
            tree_root: tree_root.to_path_buf(),
            records: records.len(),
            files: tree.files.into_iter().map(|f| f.name).collect(),
            ignored: tree.ignored,
        })
    }

    fn write_records<'d>(
        &self,
        descriptors: impl IntoIterator<Item = &'d TaskDescriptor>,
        dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let base_image = self.options.base_image.as_deref();
        descriptors
            .into_iter()
            .enumerate()
            .map(|(index, descriptor)| {
                let record = TaskRecord::from_descriptor(descriptor, base_image);
                let path = dir.join(paths::task_record(index));
                fs::write(&path, record.to_bytes()).map_err(|e| Error::io(&path, e))?;
                Ok(path)
            })
            .collect()
    }

    fn collect_tree(&self, root: &Path) -> Result<Tree> {
        self.reporter.debug(&format!("Archiving {}", root.display()));

        let excluded = fs::canonicalize(&self.options.output).ok();
        let mut rules = RuleCache::new(&self.options.ignore_file, self.reporter);
        let mut tree = Tree::default();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            // links to files are kept as links; links to directories are not followed
            let file_type = entry.file_type();
            if !(file_type.is_file() || (file_type.is_symlink() && !path.is_dir())) {
                continue;
            }
            if is_output(path, excluded.as_deref()) {
                continue;
            }

            let name = relative_name(root, path);
            if self.is_ignored(root, path, &mut rules)? {
                self.reporter.debug(&format!("Ignoring {name}"));
                tree.ignored.push(name);
            } else {
                tree.files.push(TreeEntry {
                    path: path.to_path_buf(),
                    name,
                });
            }
        }

        tree.files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tree)
    }

    /// A file is ignored when its own directory's rules match its name. With
    /// inheritance each ancestor up to the root is consulted too, matching
    /// against the path relative to that ancestor.
    fn is_ignored(&self, root: &Path, path: &Path, rules: &mut RuleCache<'_>) -> Result<bool> {
        let mut scope = path.parent();
        while let Some(dir) = scope {
            if !dir.starts_with(root) {
                break;
            }
            if rules.get(dir)?.is_ignored(&relative_name(dir, path)) {
                return Ok(true);
            }
            if !self.options.inherit_ignore_rules || dir == root {
                break;
            }
            scope = dir.parent();
        }
        Ok(false)
    }

    fn write_package(&self, records: &[PathBuf], code: &Path) -> Result<()> {
        let output = &self.options.output;
        let dir = output.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

        let temp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        let mut builder = Builder::new(GzEncoder::new(temp, Compression::default()));
        for path in records.iter().map(PathBuf::as_path).chain(iter::once(code)) {
            let name = path.file_name().unwrap_or_default();
            builder.append_path_with_name(path, name).map_err(|e| Error::io(path, e))?;
        }
        let temp = builder
            .into_inner()
            .and_then(GzEncoder::finish)
            .map_err(|e| Error::io(output, e))?;
        temp.persist(output)?;
        Ok(())
    }
}

/// Read a directory's ignore rules
///
/// A missing ignore file yields an empty rule set. Invalid patterns are
/// reported and skipped.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_ignore_rules(
    dir: &Path,
    file_name: &str,
    reporter: &dyn Reporter,
) -> Result<IgnoreRuleSet> {
    let path = dir.join(file_name);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(IgnoreRuleSet::empty()),
        Err(e) => return Err(Error::io(path, e)),
    };

    let (rules, invalid) = IgnoreRuleSet::parse(&content);
    for bad in invalid {
        reporter.warn(&format!(
            "{}:{}: skipping invalid pattern '{}': {}",
            path.display(),
            bad.line,
            bad.pattern,
            bad.message
        ));
    }
    if !rules.is_empty() {
        reporter.debug(&format!("Loaded {} ignore pattern(s) from {}", rules.len(), path.display()));
    }
    Ok(rules)
}

#[derive(Debug)]
struct TreeEntry {
    path: PathBuf,
    name: String,
}

#[derive(Debug, Default)]
struct Tree {
    files: Vec<TreeEntry>,
    ignored: Vec<String>,
}

/// Rule sets loaded so far, one per directory
struct RuleCache<'a> {
    file_name: &'a str,
    reporter: &'a dyn Reporter,
    sets: HashMap<PathBuf, IgnoreRuleSet>,
}

impl<'a> RuleCache<'a> {
    fn new(file_name: &'a str, reporter: &'a dyn Reporter) -> Self {
        Self {
            file_name,
            reporter,
            sets: HashMap::new(),
        }
    }

    fn get(&mut self, dir: &Path) -> Result<&IgnoreRuleSet> {
        match self.sets.entry(dir.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let rules = load_ignore_rules(dir, self.file_name, self.reporter)?;
                Ok(entry.insert(rules))
            },
        }
    }
}

fn is_output(path: &Path, output: Option<&Path>) -> bool {
    let Some(output) = output else {
        return false;
    };
    path.file_name() == output.file_name() && fs::canonicalize(path).is_ok_and(|p| p == output)
}

fn relative_name(base: &Path, path: &Path) -> String {
    path.strip_prefix(base).unwrap_or(path).to_string_lossy().replace('\\', "/")
}

fn write_tree_archive(dest: &Path, files: &[TreeEntry]) -> Result<()> {
    let file = File::create(dest).map_err(|e| Error::io(dest, e))?;
    let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
    builder.follow_symlinks(false);
    for entry in files {
        builder
            .append_path_with_name(&entry.path, &entry.name)
            .map_err(|e| Error::io(&entry.path, e))?;
    }
    builder.into_inner().and_then(GzEncoder::finish).map_err(|e| Error::io(dest, e))?;
    Ok(())
}

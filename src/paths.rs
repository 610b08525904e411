//! Centralized path definitions for taskpack
//!
//! ## Package Layout
//!
//! ```text
//! package.tgz
//! ├── task_0.pb          # one protobuf TaskRecord per descriptor
//! ├── task_1.pb
//! └── code.tar.gz        # filtered snapshot of the archived directory
//! ```
//!
//! ## Configuration
//!
//! ```text
//! <scan dir>/taskpack.toml          # project settings (preferred)
//! ~/.taskpack/config.toml           # user-level fallback
//! ```

use std::path::{Path, PathBuf};

/// Default output archive filename (in the working directory)
pub const PACKAGE_FILE: &str = "package.tgz";

/// Tree snapshot entry name inside the package
pub const CODE_ARCHIVE: &str = "code.tar.gz";

/// Default per-directory ignore file
pub const IGNORE_FILE: &str = ".gitignore";

/// Project configuration filename
pub const PROJECT_CONFIG: &str = "taskpack.toml";

/// Global config directory name
const GLOBAL_DIR: &str = ".taskpack";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Entry name of the `index`-th task record inside the package
#[must_use]
pub fn task_record(index: usize) -> String {
    format!("task_{index}.pb")
}

/// Get path to the project config file for a scan root
#[must_use]
pub fn project_config(root: &Path) -> PathBuf {
    root.join(PROJECT_CONFIG)
}

/// Get the global taskpack directory.
///
/// Returns `~/.taskpack/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.taskpack/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}

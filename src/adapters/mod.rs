//! Adapter implementations for port traits and filesystem I/O
//!
//! - [`walk`] - Source file discovery
//! - [`archive`] - Package archive writer
//! - [`log_reporter`] - `Reporter` backed by the `log` facade

pub mod archive;
pub mod log_reporter;
pub mod walk;

pub use archive::{PackageOptions, PackageSummary, Packager, load_ignore_rules};
pub use log_reporter::LogReporter;
pub use walk::find_source_files;

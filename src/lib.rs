//! taskpack - Static task discovery and packaging
//!
//! This library finds functions decorated with a task marker in Python
//! sources, extracts the literal configuration passed to the marker without
//! executing anything, and packages the resulting task records together with
//! a filtered snapshot of the source tree.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
#![warn(missing_docs, missing_copy_implementations)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod parser;
pub mod paths;
pub mod scan;

pub use config::{Config, PackageMode};
pub use error::{Error, Result};
pub use scan::Scanner;

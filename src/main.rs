//! taskpack - Package statically discovered task definitions
//!
//! Scans a directory for `@task`-decorated Python functions and writes their
//! records plus a snapshot of the sources into one archive.

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
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;

fn main() -> anyhow::Result<()> {
    cli::run()
}

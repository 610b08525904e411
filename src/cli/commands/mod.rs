//! Command implementations

mod scan;

pub use scan::{ScanArgs, scan};

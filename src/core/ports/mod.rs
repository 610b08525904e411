//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core logic and the outside
//! world. Implementations live in the `adapters` module.

mod reporter;

pub use reporter::{Reporter, SilentReporter};

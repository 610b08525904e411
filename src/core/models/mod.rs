//! Domain models
//!
//! - [`literal`] - Statically resolved values
//! - [`descriptor`] - Task descriptors, markers and parameters
//! - [`ignore`] - Per-directory ignore rule sets
//! - [`record`] - Binary task record schema

mod descriptor;
mod ignore;
mod literal;
mod record;

pub use descriptor::{MalformedDecorator, MarkerKind, MarkerSet, ParameterInfo, TaskDescriptor};
pub use ignore::{IgnoreRuleSet, InvalidPattern};
pub use literal::{Literal, Mapping};
pub use record::{TaskRecord, TaskType};

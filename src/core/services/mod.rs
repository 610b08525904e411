//! Business logic services
//!
//! Pure logic that operates on parsed modules and domain models. These
//! services have no I/O dependencies.
//!
//! - [`evaluator`] - Resolve expressions to literals
//! - [`extractor`] - Find marker-decorated functions
//! - [`aggregator`] - Merge descriptors across files

pub mod aggregator;
pub mod evaluator;
pub mod extractor;

pub use aggregator::{DescriptorSet, SourcedDescriptor};
pub use evaluator::evaluate;
pub use extractor::{Extraction, extract_descriptors};

//! Core domain logic for taskpack
//!
//! This module contains pure logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Literal, TaskDescriptor, IgnoreRuleSet, TaskRecord)
//! - `services/` - Evaluation, extraction and aggregation
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;

//! Descriptor aggregator - merges per-file results
//!
//! Descriptors are grouped by marker kind and keep scan order within a
//! group. Only retained kinds are stored; by default that is tasks alone,
//! so workflow markers are recognized but not carried into the package.
//! Names are not de-duplicated.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::models::{MarkerKind, TaskDescriptor};

/// A descriptor together with the file it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourcedDescriptor {
    /// Source file path as scanned
    pub source: PathBuf,
    /// The descriptor
    #[serde(flatten)]
    pub descriptor: TaskDescriptor,
}

/// Ordered collection of descriptors grouped by kind
#[derive(Debug, Clone)]
pub struct DescriptorSet {
    retained: BTreeSet<MarkerKind>,
    groups: BTreeMap<MarkerKind, Vec<SourcedDescriptor>>,
    dropped: usize,
}

impl Default for DescriptorSet {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorSet {
    /// Create a set that retains tasks only
    #[must_use]
    pub fn new() -> Self {
        Self::retaining([MarkerKind::Task])
    }

    /// Create a set that retains the given kinds
    pub fn retaining(kinds: impl IntoIterator<Item = MarkerKind>) -> Self {
        Self {
            retained: kinds.into_iter().collect(),
            groups: BTreeMap::new(),
            dropped: 0,
        }
    }

    /// Check whether a kind is retained
    #[must_use]
    pub fn retains(&self, kind: MarkerKind) -> bool {
        self.retained.contains(&kind)
    }

    /// Append one file's descriptors, returning how many were retained
    pub fn extend(
        &mut self,
        source: &Path,
        descriptors: impl IntoIterator<Item = TaskDescriptor>,
    ) -> usize {
        let mut kept = 0;
        for descriptor in descriptors {
            if !self.retains(descriptor.kind) {
                self.dropped += 1;
                continue;
            }
            self.groups.entry(descriptor.kind).or_default().push(SourcedDescriptor {
                source: source.to_path_buf(),
                descriptor,
            });
            kept += 1;
        }
        kept
    }

    /// Retained descriptors of one kind, in scan order
    #[must_use]
    pub fn of_kind(&self, kind: MarkerKind) -> &[SourcedDescriptor] {
        self.groups.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Retained task descriptors, in scan order
    #[must_use]
    pub fn tasks(&self) -> &[SourcedDescriptor] {
        self.of_kind(MarkerKind::Task)
    }

    /// Every retained descriptor: tasks first, then workflows
    pub fn iter(&self) -> impl Iterator<Item = &SourcedDescriptor> {
        self.groups.values().flatten()
    }

    /// Number of retained descriptors
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Check if nothing was retained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of descriptors seen but not retained
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }
}

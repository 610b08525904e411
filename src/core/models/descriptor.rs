//! Task descriptors
//!
//! A descriptor is the literal-only record of one decorated function: the
//! configuration passed to its marker decorator plus its signature.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Literal, Mapping};

/// Kind of definition a marker decorator declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// A single task
    Task,
    /// A workflow composing tasks
    Workflow,
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task => write!(f, "task"),
            Self::Workflow => write!(f, "workflow"),
        }
    }
}

impl std::str::FromStr for MarkerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(Self::Task),
            "workflow" => Ok(Self::Workflow),
            _ => Err(format!("Invalid marker kind: {s}. Use: task, workflow")),
        }
    }
}

/// Recognized decorator names and the kind each declares
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerSet {
    markers: BTreeMap<String, MarkerKind>,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new([("task", MarkerKind::Task), ("Workflow", MarkerKind::Workflow)])
    }
}

impl MarkerSet {
    /// Create a marker set from `(name, kind)` pairs
    pub fn new<'a>(markers: impl IntoIterator<Item = (&'a str, MarkerKind)>) -> Self {
        Self {
            markers: markers.into_iter().map(|(name, kind)| (name.to_string(), kind)).collect(),
        }
    }

    /// The kind declared by a decorator name, if it is a marker
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<MarkerKind> {
        self.markers.get(name).copied()
    }

    /// Number of markers
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Check if no markers are recognized
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// A parameter of a decorated function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterInfo {
    /// Parameter name
    pub name: String,
    /// Evaluated type annotation
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Literal>,
}

impl ParameterInfo {
    /// Create a parameter without annotation
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
        }
    }

    /// Attach an annotation
    #[must_use]
    pub fn with_annotation(mut self, annotation: Literal) -> Self {
        self.annotation = Some(annotation);
        self
    }
}

/// One decorated function's declared configuration and signature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDescriptor {
    /// Function identifier
    pub name: String,
    /// Marker kind that produced this descriptor
    pub kind: MarkerKind,
    /// Keyword arguments of the spec-builder call
    pub config: Mapping,
    /// Standard parameters in declaration order
    pub inputs: Vec<ParameterInfo>,
    /// Evaluated return annotation
    pub output: Option<Literal>,
    /// Line of the function definition (1-indexed)
    pub line: usize,
}

impl TaskDescriptor {
    /// Create a descriptor with an empty configuration and signature
    #[must_use]
    pub fn new(name: impl Into<String>, kind: MarkerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            config: Mapping::new(),
            inputs: Vec::new(),
            output: None,
            line: 0,
        }
    }

    /// Look up a configuration value
    #[must_use]
    pub fn config_value(&self, key: &str) -> Option<&Literal> {
        self.config.get(key)
    }
}

/// A marker decorator that did not have the expected
/// `marker(Spec(key=value, ...))` shape
///
/// Absorbed during extraction: the function still yields a descriptor, with
/// an empty configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedDecorator {
    /// Decorated function name
    pub function: String,
    /// Marker name used
    pub marker: String,
    /// Line of the function definition (1-indexed)
    pub line: usize,
    /// What was wrong
    pub reason: String,
}

impl std::fmt::Display for MalformedDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{} on `{}` (line {}): {}", self.marker, self.function, self.line, self.reason)
    }
}

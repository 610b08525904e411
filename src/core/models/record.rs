//! Binary task record
//!
//! The protobuf message written into the package for every descriptor. Field
//! numbers are part of the wire contract with the consumers of the package.

use std::collections::BTreeMap;

use prost::Message;

use super::{Literal, TaskDescriptor};

/// Runtime a task executes on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum TaskType {
    /// Python entrypoint
    Python = 0,
}

impl TaskType {
    /// Parse a type name such as `TaskType.PYTHON` or `python`
    ///
    /// Only the last dotted segment is considered.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let last = name.rsplit('.').next().unwrap_or_default();
        last.eq_ignore_ascii_case("python").then_some(Self::Python)
    }

    /// Resolve a configured type literal, defaulting when absent or unknown
    #[must_use]
    pub fn from_literal(value: Option<&Literal>) -> Self {
        value.and_then(Literal::as_text).and_then(Self::parse).unwrap_or(Self::Python)
    }
}

/// Serialized form of one task descriptor
#[derive(Clone, PartialEq, Message)]
pub struct TaskRecord {
    /// Task name
    #[prost(string, tag = "1")]
    pub name: String,
    /// Runtime type
    #[prost(enumeration = "TaskType", tag = "2")]
    pub r#type: i32,
    /// Free-form description
    #[prost(string, tag = "3")]
    pub description: String,
    /// Names of tasks this one depends on
    #[prost(string, repeated, tag = "4")]
    pub dependencies: Vec<String>,
    /// Arbitrary string metadata
    #[prost(btree_map = "string, string", tag = "5")]
    pub metadata: BTreeMap<String, String>,
    /// Container image the task runs in
    #[prost(string, tag = "6")]
    pub base_image: String,
    /// Command run inside the image
    #[prost(string, tag = "7")]
    pub entrypoint: String,
    /// Arguments passed to the entrypoint
    #[prost(string, repeated, tag = "8")]
    pub args: Vec<String>,
    /// Environment variables
    #[prost(btree_map = "string, string", tag = "9")]
    pub env: BTreeMap<String, String>,
}

impl TaskRecord {
    /// Build a record from a descriptor's configuration
    ///
    /// `base_image_override`, when given, replaces the configured base image.
    #[must_use]
    pub fn from_descriptor(descriptor: &TaskDescriptor, base_image_override: Option<&str>) -> Self {
        let config = &descriptor.config;

        let name = config
            .get("name")
            .and_then(Literal::as_text)
            .filter(|n| !n.is_empty())
            .unwrap_or(descriptor.name.as_str())
            .to_string();

        let base_image = base_image_override
            .map_or_else(|| text(config.get("base_image")), ToString::to_string);

        Self {
            name,
            r#type: TaskType::from_literal(config.get("type")) as i32,
            description: text(config.get("description")),
            dependencies: strings(config.get("dependencies")),
            metadata: string_map(config.get("metadata")),
            base_image,
            entrypoint: text(config.get("entrypoint")),
            args: strings(config.get("args")),
            env: string_map(config.get("env")),
        }
    }

    /// Protobuf wire encoding
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }
}

fn text(value: Option<&Literal>) -> String {
    match value {
        None | Some(Literal::None) => String::new(),
        Some(v) => v.to_string(),
    }
}

fn strings(value: Option<&Literal>) -> Vec<String> {
    match value {
        None | Some(Literal::None) => Vec::new(),
        Some(Literal::List(items)) => items.iter().map(ToString::to_string).collect(),
        Some(scalar) => vec![scalar.to_string()],
    }
}

fn string_map(value: Option<&Literal>) -> BTreeMap<String, String> {
    value
        .and_then(Literal::as_map)
        .map(|map| map.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
        .unwrap_or_default()
}

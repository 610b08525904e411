//! Shared test fixtures and helpers
//!
//! This module provides common utilities for testing taskpack components.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use flate2::read::GzDecoder;
use log::Level;
use taskpack::core::models::{Literal, MarkerSet, TaskDescriptor};
use taskpack::core::ports::Reporter;
use taskpack::core::services::extract_descriptors;
use taskpack::parser::parse_module;
use tempfile::TempDir;

/// A module with two tasks, one workflow and an unrelated decorator
pub const SAMPLE_TASKS: &str = r#"
from pytask import task, Workflow, TaskSpec, TaskType


@task(TaskSpec(
    name="prepare",
    type=TaskType.PYTHON,
    description="Prepare the dataset",
    dependencies=["download"],
    metadata={"owner": "data", "tier": 2},
    base_image="python:3.9",
    entrypoint="python prepare.py",
    args=["--fast", 3],
    env={"MODE": "dev"},
))
def prepare(path: str, limit: int = 10) -> dict:
    return {}


@staticmethod
def helper():
    pass


@task(TaskSpec(name="train", dependencies="prepare"))
def train(data, *, epochs=1):
    pass


@Workflow(WorkflowSpec(name="pipeline"))
def pipeline():
    pass
"#;

/// A temporary project directory
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Root of the project
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a project file
    pub fn join(&self, path: &str) -> PathBuf {
        self.dir.path().join(path)
    }

    /// Add a file, creating parent directories
    pub fn add_file(&self, path: &str, content: &str) {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Reporter that keeps every message in memory
#[derive(Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    /// Create an empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages at a given level
    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Check whether any message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.lock().unwrap().iter().any(|(_, m)| m.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn report(&self, level: Level, message: &str) {
        self.messages.lock().unwrap().push((level, message.to_string()));
    }
}

/// Entries of a `.tar.gz` as `(name, bytes)` in archive order
pub fn tar_entries(archive: &Path) -> Vec<(String, Vec<u8>)> {
    let file = File::open(archive).unwrap();
    read_tar(GzDecoder::new(file))
}

/// Entries of an in-memory `.tar.gz`
pub fn tar_entries_from_bytes(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    read_tar(GzDecoder::new(bytes))
}

fn read_tar(reader: impl Read) -> Vec<(String, Vec<u8>)> {
    let mut archive = tar::Archive::new(reader);
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            (name, data)
        })
        .collect()
}

/// Extract descriptors from source text with the default markers
pub fn extract(source: &str) -> Vec<TaskDescriptor> {
    let module = parse_module(source).unwrap();
    extract_descriptors(&module, &MarkerSet::default()).descriptors
}

/// Evaluate one expression by placing it in a decorator's spec call
pub fn eval(expr: &str) -> Literal {
    let source = format!("@task(Spec(value={expr}))\ndef f():\n    pass\n");
    let descriptors = extract(&source);
    descriptors[0].config.get("value").cloned().expect("value keyword missing")
}

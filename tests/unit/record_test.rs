//! Tests for the binary task record built from extracted descriptors

use std::collections::BTreeMap;

use prost::Message;
use taskpack::core::models::{TaskRecord, TaskType};

use super::common::{SAMPLE_TASKS, extract};

#[test]
fn test_record_from_sample_task() {
    let descriptors = extract(SAMPLE_TASKS);
    let record = TaskRecord::from_descriptor(&descriptors[0], None);

    assert_eq!(record.name, "prepare");
    assert_eq!(record.r#type, TaskType::Python as i32);
    assert_eq!(record.description, "Prepare the dataset");
    assert_eq!(record.dependencies, vec!["download"]);
    assert_eq!(
        record.metadata,
        BTreeMap::from([
            ("owner".to_string(), "data".to_string()),
            ("tier".to_string(), "2".to_string()),
        ])
    );
    assert_eq!(record.base_image, "python:3.9");
    assert_eq!(record.entrypoint, "python prepare.py");
    assert_eq!(record.args, vec!["--fast", "3"]);
    assert_eq!(record.env.get("MODE").map(String::as_str), Some("dev"));
}

#[test]
fn test_scalar_dependency_becomes_single_entry() {
    let descriptors = extract(SAMPLE_TASKS);
    let record = TaskRecord::from_descriptor(&descriptors[1], Some("python:3.12"));
    assert_eq!(record.dependencies, vec!["prepare"]);
    assert_eq!(record.base_image, "python:3.12");
    assert!(record.args.is_empty());
    assert!(record.env.is_empty());
}

#[test]
fn test_record_survives_wire_encoding() {
    let descriptors = extract(SAMPLE_TASKS);
    let record = TaskRecord::from_descriptor(&descriptors[0], None);
    let decoded = TaskRecord::decode(record.to_bytes().as_slice()).unwrap();
    assert_eq!(decoded, record);
}

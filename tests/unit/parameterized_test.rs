//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use taskpack::core::models::{IgnoreRuleSet, Literal, TaskType};
use test_case::test_case;

use super::common::eval;

// =============================================================================
// Literal Rendering Tests
// =============================================================================

#[test_case("'text'", "text" ; "string is unquoted")]
#[test_case("7", "7" ; "integer")]
#[test_case("2.0", "2.0" ; "whole float keeps point")]
#[test_case("True", "True" ; "boolean")]
#[test_case("None", "None" ; "none")]
#[test_case("[1, 'a']", "[1, 'a']" ; "list uses repr")]
#[test_case("{'k': \"it's\"}", "{'k': \"it's\"}" ; "repr switches quotes")]
#[test_case("Kind.FAST", "Kind.FAST" ; "attribute")]
#[test_case("make(1, size='x')", "make(1, size=x)" ; "call arguments use str")]
fn test_literal_display(expr: &str, expected: &str) {
    assert_eq!(eval(expr).to_string(), expected);
}

// =============================================================================
// Task Type Tests
// =============================================================================

#[test_case("TaskType.PYTHON", Some(TaskType::Python) ; "enum attribute")]
#[test_case("pytask.TaskType.PYTHON", Some(TaskType::Python) ; "qualified attribute")]
#[test_case("python", Some(TaskType::Python) ; "lowercase name")]
#[test_case("TaskType.SHELL", None ; "unknown variant")]
#[test_case("", None ; "empty")]
fn test_task_type_parse(name: &str, expected: Option<TaskType>) {
    assert_eq!(TaskType::parse(name), expected);
}

#[test_case(None, TaskType::Python ; "absent")]
#[test_case(Some(Literal::Str("TaskType.SHELL".into())), TaskType::Python ; "unknown falls back")]
#[test_case(Some(Literal::Int(3)), TaskType::Python ; "non text falls back")]
fn test_task_type_from_literal(value: Option<Literal>, expected: TaskType) {
    assert_eq!(TaskType::from_literal(value.as_ref()), expected);
}

// =============================================================================
// Ignore Pattern Tests
// =============================================================================

#[test_case("*.log", "debug.log", true ; "extension")]
#[test_case("*.log", "debug.txt", false ; "other extension")]
#[test_case("*.log", "logs/debug.log", true ; "star crosses separator")]
#[test_case("build", "build", true ; "exact name")]
#[test_case("build", "build.py", false ; "exact name only")]
#[test_case("data?.csv", "data1.csv", true ; "question mark")]
#[test_case("[ab].py", "b.py", true ; "character class")]
#[test_case("[!ab].py", "c.py", true ; "negated class")]
#[test_case(".env*", ".env.local", true ; "leading dot")]
fn test_ignore_matching(pattern: &str, path: &str, expected: bool) {
    let (rules, invalid) = IgnoreRuleSet::parse(pattern);
    assert!(invalid.is_empty());
    assert_eq!(rules.is_ignored(path), expected, "pattern={pattern:?} path={path:?}");
}

//! Tests for configuration loading

use std::path::PathBuf;

use taskpack::config::{Config, PackageMode};
use taskpack::core::models::MarkerKind;
use taskpack::{Error, paths};

use super::common::TestProject;

// =============================================================================
// PROJECT CONFIG
// =============================================================================

#[test]
fn test_project_config_is_loaded() {
    let project = TestProject::new();
    project.add_file(
        paths::PROJECT_CONFIG,
        r#"
[scan]
extensions = ["py", "pyi"]
retain_workflows = true

[scan.markers]
task = "task"
job = "task"
Flow = "workflow"

[package]
output = "dist/bundle.tgz"
mode = "per-file"
ignore_file = ".packignore"
inherit_ignore_rules = true
"#,
    );

    let config = Config::load(project.path()).unwrap();
    assert_eq!(config.scan.extensions, vec!["py", "pyi"]);
    assert_eq!(config.scan.markers.kind_of("job"), Some(MarkerKind::Task));
    assert_eq!(config.scan.markers.kind_of("Flow"), Some(MarkerKind::Workflow));
    assert_eq!(config.scan.markers.kind_of("Workflow"), None);
    assert_eq!(config.retained_kinds(), vec![MarkerKind::Task, MarkerKind::Workflow]);
    assert_eq!(config.package.output, PathBuf::from("dist/bundle.tgz"));
    assert_eq!(config.package.mode, PackageMode::PerFile);
    assert_eq!(config.package.ignore_file, ".packignore");
    assert!(config.package.inherit_ignore_rules);
}

#[test]
fn test_empty_file_is_all_defaults() {
    let project = TestProject::new();
    project.add_file(paths::PROJECT_CONFIG, "");
    assert_eq!(Config::load(project.path()).unwrap(), Config::default());
}

#[test]
fn test_malformed_config_is_an_error() {
    let project = TestProject::new();
    project.add_file(paths::PROJECT_CONFIG, "[package\nmode = 3\n");

    let err = Config::load(project.path()).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(err.to_string().contains("taskpack.toml"));
}

#[test]
fn test_unknown_mode_is_an_error() {
    let project = TestProject::new();
    project.add_file(paths::PROJECT_CONFIG, "[package]\nmode = \"sometimes\"\n");
    assert!(matches!(Config::load(project.path()), Err(Error::Config { .. })));
}

#[test]
fn test_load_file_roundtrips_serialized_config() {
    let project = TestProject::new();
    let mut config = Config::default();
    config.package.base_image = Some("python:3.11-slim".into());
    config.package.mode = PackageMode::PerFile;
    project.add_file("custom.toml", &toml::to_string(&config).unwrap());

    let loaded = Config::load_file(&project.join("custom.toml")).unwrap();
    assert_eq!(loaded, config);
}

//! Tests for ignore rule loading and tree filtering

use std::iter;

use taskpack::adapters::{PackageOptions, Packager, load_ignore_rules};
use taskpack::core::models::IgnoreRuleSet;

use super::common::{MemoryReporter, TestProject};

fn package_tree(project: &TestProject, inherit: bool) -> (Vec<String>, Vec<String>) {
    let options = PackageOptions {
        output: project.join("out/package.tgz"),
        inherit_ignore_rules: inherit,
        ..PackageOptions::default()
    };
    std::fs::create_dir_all(project.join("out")).unwrap();
    let reporter = MemoryReporter::new();
    let summary = Packager::new(options, &reporter)
        .package(iter::empty(), &project.join("src"))
        .unwrap();
    (summary.files, summary.ignored)
}

#[test]
fn test_pattern_applies_to_its_own_directory_only() {
    let project = TestProject::new();
    project.add_file("src/.gitignore", "*.log\n");
    project.add_file("src/debug.log", "x");
    project.add_file("src/tasks.py", "x");
    project.add_file("src/nested/debug.log", "x");

    let (files, ignored) = package_tree(&project, false);
    assert_eq!(files, vec![".gitignore", "nested/debug.log", "tasks.py"]);
    assert_eq!(ignored, vec!["debug.log"]);
}

#[test]
fn test_subdirectory_rules_apply_inside_it() {
    let project = TestProject::new();
    project.add_file("src/a.tmp", "x");
    project.add_file("src/cache/.gitignore", "*.tmp\n");
    project.add_file("src/cache/b.tmp", "x");

    let (files, ignored) = package_tree(&project, false);
    assert_eq!(files, vec!["a.tmp", "cache/.gitignore"]);
    assert_eq!(ignored, vec!["cache/b.tmp"]);
}

#[test]
fn test_inherited_rules_match_relative_to_owner() {
    let project = TestProject::new();
    project.add_file("src/.gitignore", "build/*\n*.log\n");
    project.add_file("src/build/out.bin", "x");
    project.add_file("src/pkg/build/keep.bin", "x");
    project.add_file("src/pkg/run.log", "x");

    let (files, ignored) = package_tree(&project, true);
    // patterns are anchored at the directory that owns them
    assert_eq!(files, vec![".gitignore", "pkg/build/keep.bin"]);
    assert_eq!(ignored, vec!["build/out.bin", "pkg/run.log"]);
}

#[test]
fn test_invalid_patterns_are_reported() {
    let project = TestProject::new();
    project.add_file(".gitignore", "[oops\n*.pyc\n");

    let reporter = MemoryReporter::new();
    let rules = load_ignore_rules(project.path(), ".gitignore", &reporter).unwrap();
    assert_eq!(rules.len(), 1);
    assert!(rules.is_ignored("mod.pyc"));
    assert_eq!(reporter.at(log::Level::Warn).len(), 1);
    assert!(reporter.contains("[oops"));
}

#[test]
fn test_custom_ignore_file_name() {
    let project = TestProject::new();
    project.add_file(".packignore", "secret.txt\n");

    let reporter = MemoryReporter::new();
    let rules = load_ignore_rules(project.path(), ".packignore", &reporter).unwrap();
    assert!(rules.is_ignored("secret.txt"));

    let default = load_ignore_rules(project.path(), ".gitignore", &reporter).unwrap();
    assert!(default.is_empty());
}

#[test]
fn test_leading_slash_is_anchored_name() {
    let (rules, invalid) = IgnoreRuleSet::parse("/dist\n");
    assert!(invalid.is_empty());
    assert!(rules.is_ignored("dist"));
}

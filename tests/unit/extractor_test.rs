//! Tests for decorator extraction over real source files

use taskpack::core::models::{Literal, MarkerKind, MarkerSet, ParameterInfo};
use taskpack::core::services::extract_descriptors;
use taskpack::parser::parse_module;

use super::common::{SAMPLE_TASKS, extract};

#[test]
fn test_sample_yields_tasks_and_workflow_in_order() {
    let descriptors = extract(SAMPLE_TASKS);
    let found: Vec<_> = descriptors.iter().map(|d| (d.name.as_str(), d.kind)).collect();
    assert_eq!(
        found,
        vec![
            ("prepare", MarkerKind::Task),
            ("train", MarkerKind::Task),
            ("pipeline", MarkerKind::Workflow),
        ]
    );
}

#[test]
fn test_config_has_exactly_the_source_keywords() {
    let descriptors = extract(SAMPLE_TASKS);
    let prepare = &descriptors[0];
    assert_eq!(
        prepare.config.keys().collect::<Vec<_>>(),
        vec![
            "name",
            "type",
            "description",
            "dependencies",
            "metadata",
            "base_image",
            "entrypoint",
            "args",
            "env",
        ]
    );
    assert_eq!(prepare.config_value("type"), Some(&Literal::Str("TaskType.PYTHON".into())));
    assert_eq!(
        prepare.config_value("args"),
        Some(&Literal::List(vec![Literal::Str("--fast".into()), Literal::Int(3)]))
    );
}

#[test]
fn test_signature_extraction() {
    let descriptors = extract(SAMPLE_TASKS);

    let prepare = &descriptors[0];
    assert_eq!(
        prepare.inputs,
        vec![
            ParameterInfo::new("path").with_annotation(Literal::Str("str".into())),
            ParameterInfo::new("limit").with_annotation(Literal::Str("int".into())),
        ]
    );
    assert_eq!(prepare.output, Some(Literal::Str("dict".into())));

    // keyword-only parameters are not part of the standard argument list
    let train = &descriptors[1];
    assert_eq!(train.inputs, vec![ParameterInfo::new("data")]);
    assert_eq!(train.output, None);
}

#[test]
fn test_generic_annotation_falls_back_to_text() {
    let descriptors = extract(
        "@task(Spec(name=\"x\"))\ndef f(rows: List[int]) -> Optional[str]:\n    pass\n",
    );
    assert_eq!(descriptors[0].inputs[0].annotation, Some(Literal::Unparsed("List[int]".into())));
    assert_eq!(descriptors[0].output, Some(Literal::Unparsed("Optional[str]".into())));
}

#[test]
fn test_empty_spec_yields_empty_config() {
    let module = parse_module("@task(Spec())\ndef f():\n    pass\n").unwrap();
    let extraction = extract_descriptors(&module, &MarkerSet::default());
    assert_eq!(extraction.len(), 1);
    assert!(extraction.descriptors[0].config.is_empty());
    assert_eq!(extraction.malformed.len(), 1);
}

#[test]
fn test_malformed_decorator_does_not_abort_file() {
    let source = r#"
@task("not a call")
def first():
    pass

@task
def second():
    pass

@task(Spec(name="third"))
def third():
    pass
"#;
    let module = parse_module(source).unwrap();
    let extraction = extract_descriptors(&module, &MarkerSet::default());

    // bare `@task` is not a call and so not a marker invocation at all
    let names: Vec<_> = extraction.descriptors.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["first", "third"]);
    assert!(extraction.descriptors[0].config.is_empty());
    assert_eq!(extraction.malformed.len(), 1);
    assert_eq!(extraction.malformed[0].function, "first");
}

#[test]
fn test_methods_and_nested_functions_are_visited() {
    let source = r#"
class Jobs:
    @task(Spec(name="method"))
    def run(self, x):
        @task(Spec(name="inner"))
        def inner():
            pass
"#;
    let descriptors = extract(source);
    let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["run", "inner"]);
    let inputs: Vec<_> = descriptors[0].inputs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(inputs, vec!["self", "x"]);
}

#[test]
fn test_dotted_marker_is_not_recognized() {
    let descriptors = extract("@pytask.task(Spec(name=\"x\"))\ndef f():\n    pass\n");
    assert!(descriptors.is_empty());
}

#[test]
fn test_custom_markers() {
    let markers = MarkerSet::new([("job", MarkerKind::Task)]);
    let module =
        parse_module("@job(Spec(name=\"a\"))\ndef a():\n    pass\n\n@task(Spec())\ndef b():\n    pass\n")
            .unwrap();
    let extraction = extract_descriptors(&module, &markers);
    assert_eq!(extraction.len(), 1);
    assert_eq!(extraction.descriptors[0].name, "a");
}

#[test]
fn test_extraction_is_idempotent() {
    assert_eq!(extract(SAMPLE_TASKS), extract(SAMPLE_TASKS));
}

#[test]
fn test_invalid_source_is_a_parse_error() {
    assert!(parse_module("@task(Spec(name=\"x\")\ndef f(:\n").is_err());
}

#[test]
fn test_repeated_spec_keyword_is_a_parse_error() {
    let err = parse_module("@task(Spec(name=\"x\", name=\"y\"))\ndef f():\n    pass\n").unwrap_err();
    assert_eq!(err.line, 1);
    assert!(err.message.contains("keyword argument repeated: name"));
}

#[test]
fn test_positional_after_keyword_is_a_parse_error() {
    let err = parse_module("@task(Spec(name=\"x\", 1))\ndef f():\n    pass\n").unwrap_err();
    assert_eq!((err.line, err.column), (1, 22));
    assert!(err.message.contains("positional argument follows keyword argument"));
}

#[test]
fn test_python2_print_is_a_parse_error() {
    let source = "@task(Spec(name=\"x\"))\ndef f():\n    print \"hi\"\n";
    let err = parse_module(source).unwrap_err();
    assert_eq!(err.line, 3);
}

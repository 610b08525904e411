//! Tests for literal evaluation of real Python expressions

use taskpack::core::models::Literal;

use super::common::eval;

// =============================================================================
// SCALARS
// =============================================================================

#[test]
fn test_scalar_constants() {
    assert_eq!(eval("\"hello\""), Literal::Str("hello".into()));
    assert_eq!(eval("'single'"), Literal::Str("single".into()));
    assert_eq!(eval("42"), Literal::Int(42));
    assert_eq!(eval("0x1F"), Literal::Int(31));
    assert_eq!(eval("1_000"), Literal::Int(1000));
    assert_eq!(eval("2.5"), Literal::Float(2.5));
    assert_eq!(eval("True"), Literal::Bool(true));
    assert_eq!(eval("False"), Literal::Bool(false));
    assert_eq!(eval("None"), Literal::None);
}

#[test]
fn test_string_escapes_and_concatenation() {
    assert_eq!(eval(r#""a\tb""#), Literal::Str("a\tb".into()));
    assert_eq!(eval(r#"r"a\tb""#), Literal::Str(r"a\tb".into()));
    assert_eq!(eval(r#""ab" "cd""#), Literal::Str("abcd".into()));
}

#[test]
fn test_identifier_is_text_not_lookup() {
    assert_eq!(eval("SOME_CONSTANT"), Literal::Str("SOME_CONSTANT".into()));
}

#[test]
fn test_attribute_chain_is_dotted_text() {
    assert_eq!(eval("task.PYTHON"), Literal::Str("task.PYTHON".into()));
    assert_eq!(eval("a.b.c"), Literal::Str("a.b.c".into()));
}

// =============================================================================
// CONTAINERS
// =============================================================================

#[test]
fn test_sequence_round_trip() {
    assert_eq!(
        eval("[1, \"a\", True]"),
        Literal::List(vec![Literal::Int(1), Literal::Str("a".into()), Literal::Bool(true)])
    );
}

#[test]
fn test_mapping_round_trip() {
    let value = eval("{\"k\": \"v\"}");
    let map = value.as_map().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("k"), Some(&Literal::Str("v".into())));
}

#[test]
fn test_mapping_duplicate_key_last_wins() {
    let value = eval("{\"a\": 1, \"b\": 2, \"a\": 3}");
    let map = value.as_map().unwrap();
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(map.get("a"), Some(&Literal::Int(3)));
}

#[test]
fn test_nested_containers() {
    let value = eval("{\"xs\": [1, [2]], \"m\": {\"n\": None}}");
    assert_eq!(value.to_string(), "{'xs': [1, [2]], 'm': {'n': None}}");
}

// =============================================================================
// FALLBACKS
// =============================================================================

#[test]
fn test_call_reconstruction() {
    assert_eq!(eval("f(1, x=2)"), Literal::Unparsed("f(1, x=2)".into()));
    assert_eq!(eval("mod.make()"), Literal::Unparsed("mod.make()".into()));
    assert_eq!(eval("f(g(1), k=[1, 'a'])"), Literal::Unparsed("f(g(1), k=[1, 'a'])".into()));
    assert_eq!(
        eval("f(1e16, 1e-5, 1.5e300)"),
        Literal::Unparsed("f(1e+16, 1e-05, 1.5e+300)".into())
    );
}

#[test]
fn test_boolean_combination() {
    assert_eq!(eval("a and b"), Literal::Unparsed("a and b".into()));
    assert_eq!(eval("a or b or c"), Literal::Unparsed("a or b or c".into()));
}

#[test]
fn test_unsupported_forms_degrade_to_text() {
    assert_eq!(eval("-1"), Literal::Unparsed("-1".into()));
    assert_eq!(eval("x + y"), Literal::Unparsed("x + y".into()));
    assert!(matches!(eval("lambda: 0"), Literal::Unparsed(_)));
    assert!(matches!(eval("f\"{x}\""), Literal::Unparsed(_)));
}

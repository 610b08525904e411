//! Python source parser backed by tree-sitter
//!
//! Lowers the tree-sitter concrete syntax tree into the [`syntax`](super::syntax)
//! model. Nothing here evaluates code: string escapes and numeric literals are
//! decoded, everything else that is not one of the modelled node kinds is kept
//! as its source text.

use tree_sitter::{Node, Parser};

use super::SourceParser;
use super::syntax::{
    BoolOperator, Constant, Expr, FunctionDef, Keyword, ParamKind, Parameter, ParseError,
    SourceModule, Span,
};

/// tree-sitter based parser for `.py` files
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonParser;

impl SourceParser for PythonParser {
    fn name(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &[&str] {
        &["py", "pyi"]
    }

    fn parse(&self, source: &str) -> Result<SourceModule, ParseError> {
        parse_module(source)
    }
}

/// Parse Python source into a [`SourceModule`]
///
/// # Errors
///
/// Returns a [`ParseError`] pointing at the first syntax error if the source
/// is not valid Python.
pub fn parse_module(source: &str) -> Result<SourceModule, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_python::LANGUAGE.into()).map_err(|e| ParseError {
        line: 0,
        column: 0,
        message: format!("python grammar unavailable: {e}"),
    })?;

    let tree = parser.parse(source, None).ok_or_else(|| ParseError {
        line: 1,
        column: 1,
        message: "parser produced no tree".to_string(),
    })?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(first_error(root));
    }
    check_grammar(root, source.as_bytes())?;

    let mut functions = Vec::new();
    collect_functions(root, source.as_bytes(), &mut functions);
    Ok(SourceModule::new(functions))
}

fn first_error(root: Node<'_>) -> ParseError {
    let node = find_error_node(root).unwrap_or(root);
    if node.is_missing() {
        error_at(node, format!("missing `{}`", node.kind()))
    } else {
        error_at(node, "invalid syntax")
    }
}

fn find_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(Node::has_error)
        .find_map(find_error_node);
    found
}

fn error_at(node: Node<'_>, message: impl Into<String>) -> ParseError {
    let pos = node.start_position();
    ParseError {
        line: pos.row + 1,
        column: pos.column + 1,
        message: message.into(),
    }
}

/// Reject constructs the tree-sitter grammar accepts but Python 3 does not
fn check_grammar(node: Node<'_>, src: &[u8]) -> Result<(), ParseError> {
    match node.kind() {
        // `print >>f, x` is also a valid Python 3 expression
        "print_statement" if !has_child(node, "chevron") => {
            return Err(error_at(node, "missing parentheses in call to 'print'"));
        },
        "exec_statement" => {
            return Err(error_at(node, "missing parentheses in call to 'exec'"));
        },
        "argument_list" => check_arguments(node, src)?,
        _ => {},
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        check_grammar(child, src)?;
    }
    Ok(())
}

fn has_child(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}

/// Argument ordering and keyword uniqueness within one call
fn check_arguments(node: Node<'_>, src: &[u8]) -> Result<(), ParseError> {
    let mut seen_keyword = false;
    let mut seen_mapping_splat = false;
    let mut names: Vec<String> = Vec::new();

    let mut cursor = node.walk();
    for arg in node.named_children(&mut cursor) {
        match arg.kind() {
            "comment" => {},
            "keyword_argument" => {
                seen_keyword = true;
                let Some(name) = arg.child_by_field_name("name").map(|n| text(n, src)) else {
                    continue;
                };
                if names.contains(&name) {
                    return Err(error_at(arg, format!("keyword argument repeated: {name}")));
                }
                names.push(name);
            },
            "dictionary_splat" => seen_mapping_splat = true,
            "list_splat" | "parenthesized_list_splat" if seen_mapping_splat => {
                return Err(error_at(
                    arg,
                    "iterable argument unpacking follows keyword argument unpacking",
                ));
            },
            "list_splat" | "parenthesized_list_splat" => {},
            _ if seen_mapping_splat => {
                return Err(error_at(arg, "positional argument follows keyword argument unpacking"));
            },
            _ if seen_keyword => {
                return Err(error_at(arg, "positional argument follows keyword argument"));
            },
            _ => {},
        }
    }
    Ok(())
}

fn collect_functions(node: Node<'_>, src: &[u8], out: &mut Vec<FunctionDef>) {
    if node.kind() == "function_definition" {
        out.push(lower_function(node, src));
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_functions(child, src, out);
    }
}

fn text(node: Node<'_>, src: &[u8]) -> String {
    node.utf8_text(src).unwrap_or_default().to_string()
}

fn first_named(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() != "comment");
    found
}

fn lower_function(node: Node<'_>, src: &[u8]) -> FunctionDef {
    let name = node.child_by_field_name("name").map(|n| text(n, src)).unwrap_or_default();
    let params = node
        .child_by_field_name("parameters")
        .map(|n| lower_parameters(n, src))
        .unwrap_or_default();
    let returns = node.child_by_field_name("return_type").map(|n| lower_type(n, src));
    let is_async = node.child(0).is_some_and(|c| c.kind() == "async");

    let decorators = node
        .parent()
        .filter(|p| p.kind() == "decorated_definition")
        .map(|p| lower_decorators(p, src))
        .unwrap_or_default();

    FunctionDef {
        name,
        decorators,
        params,
        returns,
        is_async,
        span: Span::new(node.start_byte(), node.end_byte(), node.start_position().row + 1),
    }
}

fn lower_decorators(definition: Node<'_>, src: &[u8]) -> Vec<Expr> {
    let mut cursor = definition.walk();
    let decorators = definition
        .children(&mut cursor)
        .filter(|c| c.kind() == "decorator")
        .filter_map(first_named)
        .map(|expr| lower_expr(expr, src))
        .collect();
    decorators
}

fn lower_type(node: Node<'_>, src: &[u8]) -> Expr {
    if node.kind() != "type" {
        return lower_expr(node, src);
    }
    first_named(node).map_or_else(|| Expr::Other(text(node, src)), |inner| lower_expr(inner, src))
}

const fn standard_kind(keyword_only: bool) -> ParamKind {
    if keyword_only {
        ParamKind::KeywordOnly
    } else {
        ParamKind::Standard
    }
}

fn splat_name(node: Node<'_>, src: &[u8]) -> String {
    text(node, src).trim_start_matches('*').trim().to_string()
}

fn lower_parameters(node: Node<'_>, src: &[u8]) -> Vec<Parameter> {
    let mut params: Vec<Parameter> = Vec::new();
    let mut keyword_only = false;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "positional_separator" | "/" => {
                for param in params.iter_mut().filter(|p| p.kind == ParamKind::Standard) {
                    param.kind = ParamKind::PositionalOnly;
                }
            },
            "keyword_separator" | "*" => keyword_only = true,
            "identifier" => params.push(Parameter {
                name: text(child, src),
                annotation: None,
                kind: standard_kind(keyword_only),
            }),
            "default_parameter" => params.push(Parameter {
                name: child.child_by_field_name("name").map(|n| text(n, src)).unwrap_or_default(),
                annotation: None,
                kind: standard_kind(keyword_only),
            }),
            "typed_default_parameter" => params.push(Parameter {
                name: child.child_by_field_name("name").map(|n| text(n, src)).unwrap_or_default(),
                annotation: child.child_by_field_name("type").map(|n| lower_type(n, src)),
                kind: standard_kind(keyword_only),
            }),
            "typed_parameter" => {
                let annotation = child.child_by_field_name("type").map(|n| lower_type(n, src));
                let Some(target) = first_named(child) else {
                    continue;
                };
                let (name, kind) = match target.kind() {
                    "list_splat_pattern" => {
                        keyword_only = true;
                        (splat_name(target, src), ParamKind::VarPositional)
                    },
                    "dictionary_splat_pattern" => (splat_name(target, src), ParamKind::VarKeyword),
                    _ => (text(target, src), standard_kind(keyword_only)),
                };
                params.push(Parameter {
                    name,
                    annotation,
                    kind,
                });
            },
            "list_splat_pattern" => {
                keyword_only = true;
                params.push(Parameter {
                    name: splat_name(child, src),
                    annotation: None,
                    kind: ParamKind::VarPositional,
                });
            },
            "dictionary_splat_pattern" => params.push(Parameter {
                name: splat_name(child, src),
                annotation: None,
                kind: ParamKind::VarKeyword,
            }),
            _ => {},
        }
    }

    params
}

fn lower_expr(node: Node<'_>, src: &[u8]) -> Expr {
    match node.kind() {
        "parenthesized_expression" => first_named(node)
            .map_or_else(|| Expr::Other(text(node, src)), |inner| lower_expr(inner, src)),
        "string" => lower_string(node, src)
            .map_or_else(|| Expr::Other(text(node, src)), |s| Expr::Constant(Constant::Str(s))),
        "concatenated_string" => lower_concatenated(node, src)
            .map_or_else(|| Expr::Other(text(node, src)), |s| Expr::Constant(Constant::Str(s))),
        "integer" => {
            let raw = text(node, src);
            parse_int(&raw).map_or(Expr::Other(raw), |v| Expr::Constant(Constant::Int(v)))
        },
        "float" => {
            let raw = text(node, src);
            parse_float(&raw).map_or(Expr::Other(raw), |v| Expr::Constant(Constant::Float(v)))
        },
        "true" => Expr::Constant(Constant::Bool(true)),
        "false" => Expr::Constant(Constant::Bool(false)),
        "none" => Expr::Constant(Constant::None),
        "identifier" => Expr::Name(text(node, src)),
        "attribute" => lower_attribute(node, src),
        "dictionary" => lower_dictionary(node, src),
        "list" => {
            let mut cursor = node.walk();
            let items = node
                .named_children(&mut cursor)
                .filter(|c| c.kind() != "comment")
                .map(|c| lower_expr(c, src))
                .collect();
            Expr::List(items)
        },
        "call" => lower_call(node, src),
        "boolean_operator" => lower_bool_op(node, src),
        _ => Expr::Other(text(node, src)),
    }
}

fn lower_attribute(node: Node<'_>, src: &[u8]) -> Expr {
    match (node.child_by_field_name("object"), node.child_by_field_name("attribute")) {
        (Some(object), Some(attr)) => Expr::Attribute {
            value: Box::new(lower_expr(object, src)),
            attr: text(attr, src),
        },
        _ => Expr::Other(text(node, src)),
    }
}

fn lower_dictionary(node: Node<'_>, src: &[u8]) -> Expr {
    let mut pairs = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "pair" {
            continue;
        }
        if let (Some(key), Some(value)) =
            (child.child_by_field_name("key"), child.child_by_field_name("value"))
        {
            pairs.push((lower_expr(key, src), lower_expr(value, src)));
        }
    }
    Expr::Dict(pairs)
}

fn lower_call(node: Node<'_>, src: &[u8]) -> Expr {
    let Some(function) = node.child_by_field_name("function") else {
        return Expr::Other(text(node, src));
    };

    let mut args = Vec::new();
    let mut keywords = Vec::new();

    if let Some(arguments) = node.child_by_field_name("arguments") {
        if arguments.kind() == "argument_list" {
            let mut cursor = arguments.walk();
            for arg in arguments.named_children(&mut cursor) {
                match arg.kind() {
                    "comment" => {},
                    "keyword_argument" => {
                        let name = arg.child_by_field_name("name").map(|n| text(n, src));
                        let value = arg
                            .child_by_field_name("value")
                            .map_or_else(|| Expr::Other(String::new()), |v| lower_expr(v, src));
                        keywords.push(Keyword { name, value });
                    },
                    "dictionary_splat" => keywords.push(Keyword {
                        name: None,
                        value: first_named(arg).map_or_else(
                            || Expr::Other(text(arg, src)),
                            |inner| lower_expr(inner, src),
                        ),
                    }),
                    _ => args.push(lower_expr(arg, src)),
                }
            }
        } else {
            // f(x for x in y)
            args.push(Expr::Other(text(arguments, src)));
        }
    }

    Expr::Call {
        func: Box::new(lower_expr(function, src)),
        args,
        keywords,
    }
}

fn lower_bool_op(node: Node<'_>, src: &[u8]) -> Expr {
    let op = match node.child_by_field_name("operator").map(|n| n.kind()) {
        Some("and") => BoolOperator::And,
        Some("or") => BoolOperator::Or,
        _ => return Expr::Other(text(node, src)),
    };
    let (Some(left), Some(right)) =
        (node.child_by_field_name("left"), node.child_by_field_name("right"))
    else {
        return Expr::Other(text(node, src));
    };

    let mut values = match lower_expr(left, src) {
        Expr::BoolOp {
            op: left_op,
            values,
        } if left_op == op && left.kind() == "boolean_operator" => values,
        other => vec![other],
    };
    values.push(lower_expr(right, src));
    Expr::BoolOp { op, values }
}

/// Decode a plain or raw string literal; `None` for f-strings and bytes
fn lower_string(node: Node<'_>, src: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();

    if children.iter().any(|c| c.kind() == "interpolation") {
        return None;
    }
    let start = children.iter().find(|c| c.kind() == "string_start")?;
    let end = children.iter().rev().find(|c| c.kind() == "string_end")?;

    let opener = start.utf8_text(src).ok()?;
    let prefix: String = opener
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if prefix.contains('f') || prefix.contains('b') {
        return None;
    }

    let body = std::str::from_utf8(src.get(start.end_byte()..end.start_byte())?).ok()?;
    if prefix.contains('r') {
        Some(body.to_string())
    } else {
        Some(decode_escapes(body))
    }
}

fn lower_concatenated(node: Node<'_>, src: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let parts: Option<Vec<String>> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "string")
        .map(|c| lower_string(c, src))
        .collect();
    parts.map(|p| p.concat())
}

/// Decode Python escape sequences in a non-raw string body
pub(crate) fn decode_escapes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {},
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = (0..width).filter_map(|_| chars.next_if(char::is_ascii_hexdigit)).collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if digits.len() == width => out.push(decoded),
                    _ => {
                        out.push('\\');
                        out.push(next);
                        out.push_str(&digits);
                    },
                }
            },
            '0'..='7' => {
                let mut digits = String::from(next);
                while digits.len() < 3 {
                    match chars.next_if(|d| ('0'..='7').contains(d)) {
                        Some(d) => digits.push(d),
                        None => break,
                    }
                }
                match u32::from_str_radix(&digits, 8).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push_str(&digits);
                    },
                }
            },
            other => {
                // Unknown escapes (and \N{...}) are kept verbatim
                out.push('\\');
                out.push(other);
            },
        }
    }

    out
}

fn parse_int(raw: &str) -> Option<i64> {
    let cleaned = raw.replace('_', "").to_ascii_lowercase();
    if cleaned.ends_with('j') || cleaned.ends_with('l') {
        return None;
    }
    let (digits, radix) = if let Some(hex) = cleaned.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(oct) = cleaned.strip_prefix("0o") {
        (oct, 8)
    } else if let Some(bin) = cleaned.strip_prefix("0b") {
        (bin, 2)
    } else {
        (cleaned.as_str(), 10)
    };
    i64::from_str_radix(digits, radix).ok()
}

fn parse_float(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('_', "");
    if cleaned.ends_with(['j', 'J']) {
        return None;
    }
    cleaned.parse().ok()
}

//! Literal evaluator - turns expression nodes into plain values
//!
//! Pure and total: every expression produces a [`Literal`]. Nothing is
//! executed and no names are resolved; forms that would need evaluation are
//! reconstructed as text.

use crate::core::models::{Literal, Mapping};
use crate::parser::{Constant, Expr, Keyword};

/// Evaluate an expression to a literal
///
/// | Expression | Result |
/// |------------|--------|
/// | constant | the value itself |
/// | `name` | `"name"` |
/// | `a.b.c` | `"a.b.c"` |
/// | `{k: v}` | mapping, last duplicate key wins |
/// | `[x, y]` | sequence |
/// | `f(1, x=2)` | unparsed `"f(1, x=2)"` |
/// | `a and b` | unparsed `"a and b"` |
/// | anything else | unparsed source text |
#[must_use]
pub fn evaluate(expr: &Expr) -> Literal {
    match expr {
        Expr::Constant(constant) => evaluate_constant(constant),
        Expr::Name(id) => Literal::Str(id.clone()),
        Expr::Attribute { value, attr } => Literal::Str(format!("{}.{attr}", evaluate(value))),
        Expr::Dict(pairs) => Literal::Map(
            pairs
                .iter()
                .map(|(key, value)| (evaluate(key).to_string(), evaluate(value)))
                .collect::<Mapping>(),
        ),
        Expr::List(items) => Literal::List(items.iter().map(evaluate).collect()),
        Expr::Call {
            func,
            args,
            keywords,
        } => Literal::Unparsed(render_call(func, args, keywords)),
        Expr::BoolOp { op, values } => {
            let operands: Vec<String> = values.iter().map(|v| evaluate(v).to_string()).collect();
            Literal::Unparsed(operands.join(&format!(" {op} ")))
        },
        Expr::Other(text) => Literal::Unparsed(text.clone()),
    }
}

fn evaluate_constant(constant: &Constant) -> Literal {
    match constant {
        Constant::None => Literal::None,
        Constant::Bool(v) => Literal::Bool(*v),
        Constant::Int(v) => Literal::Int(*v),
        Constant::Float(v) => Literal::Float(*v),
        Constant::Str(s) => Literal::Str(s.clone()),
    }
}

fn render_call(func: &Expr, args: &[Expr], keywords: &[Keyword]) -> String {
    let mut parts: Vec<String> = args.iter().map(|a| evaluate(a).to_string()).collect();
    parts.extend(keywords.iter().map(|kw| {
        let value = evaluate(&kw.value);
        kw.name.as_ref().map_or_else(|| format!("**{value}"), |name| format!("{name}={value}"))
    }));
    format!("{}({})", evaluate(func), parts.join(", "))
}

//! Language-neutral syntax model produced by source parsers
//!
//! Parsers lower their concrete trees into this closed set of node kinds so
//! the evaluator and extractor can work with exhaustive matches instead of
//! string-typed node inspection.

use serde::{Deserialize, Serialize};

/// A span in source code (byte offsets plus 1-indexed start line)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
    /// Line of the start offset (1-indexed)
    pub line: usize,
}

impl Span {
    /// Create a new span
    #[must_use]
    pub const fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }

    /// Length of the span
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A scalar constant as written in source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constant {
    /// `None`
    None,
    /// `True` / `False`
    Bool(bool),
    /// Integer literal that fits in 64 bits
    Int(i64),
    /// Floating point literal
    Float(f64),
    /// String literal with escapes decoded
    Str(String),
}

/// Boolean combinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

impl BoolOperator {
    /// The keyword as written in source
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl std::fmt::Display for BoolOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyword argument in a call (`name=value`), or a `**mapping` spread when
/// `name` is `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// Keyword name
    pub name: Option<String>,
    /// Argument value
    pub value: Expr,
}

/// An expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Scalar constant
    Constant(Constant),
    /// Bare identifier
    Name(String),
    /// Attribute access (`value.attr`)
    Attribute {
        /// The base expression
        value: Box<Self>,
        /// The accessed attribute name
        attr: String,
    },
    /// Mapping literal; pairs in source order
    Dict(Vec<(Self, Self)>),
    /// Sequence literal
    List(Vec<Self>),
    /// Call expression
    Call {
        /// The callee
        func: Box<Self>,
        /// Positional arguments
        args: Vec<Self>,
        /// Keyword arguments in source order
        keywords: Vec<Keyword>,
    },
    /// `and` / `or` chain
    BoolOp {
        /// The operator joining every operand
        op: BoolOperator,
        /// Operands in source order
        values: Vec<Self>,
    },
    /// Any other expression, kept as its source text
    Other(String),
}

impl Expr {
    /// Shorthand for a string constant
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Constant(Constant::Str(value.into()))
    }

    /// Shorthand for an identifier
    #[must_use]
    pub fn name(id: impl Into<String>) -> Self {
        Self::Name(id.into())
    }

    /// Shorthand for attribute access
    #[must_use]
    pub fn attribute(value: Self, attr: impl Into<String>) -> Self {
        Self::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        }
    }

    /// Shorthand for a call with keyword arguments only
    #[must_use]
    pub fn call(func: Self, args: Vec<Self>, keywords: Vec<(&str, Self)>) -> Self {
        Self::Call {
            func: Box::new(func),
            args,
            keywords: keywords
                .into_iter()
                .map(|(name, value)| Keyword {
                    name: Some(name.to_string()),
                    value,
                })
                .collect(),
        }
    }

    /// The callee identifier if this is a call to a bare name
    #[must_use]
    pub fn callee_name(&self) -> Option<&str> {
        match self {
            Self::Call { func, .. } => match func.as_ref() {
                Self::Name(id) => Some(id),
                _ => None,
            },
            _ => None,
        }
    }
}

/// How a parameter may be passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Before a `/` marker
    PositionalOnly,
    /// Standard positional-or-keyword parameter
    Standard,
    /// `*args`
    VarPositional,
    /// After `*` or `*args`
    KeywordOnly,
    /// `**kwargs`
    VarKeyword,
}

/// A function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name without any `*` prefix
    pub name: String,
    /// Annotation expression, if any
    pub annotation: Option<Expr>,
    /// How the parameter may be passed
    pub kind: ParamKind,
}

/// A function definition with its decorators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function identifier
    pub name: String,
    /// Decorator expressions, top to bottom
    pub decorators: Vec<Expr>,
    /// Parameters in declaration order
    pub params: Vec<Parameter>,
    /// Return annotation, if any
    pub returns: Option<Expr>,
    /// Declared with `async def`
    pub is_async: bool,
    /// Location of the `def`
    pub span: Span,
}

/// A parsed source file: every function definition in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceModule {
    /// Function definitions, including nested ones, in pre-order
    pub functions: Vec<FunctionDef>,
}

impl SourceModule {
    /// Create a module from function definitions
    #[must_use]
    pub const fn new(functions: Vec<FunctionDef>) -> Self {
        Self { functions }
    }

    /// Number of function definitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if the module defines no functions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// A source file that is not syntactically valid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("syntax error at line {line}, column {column}: {message}")]
pub struct ParseError {
    /// 1-indexed line of the first error
    pub line: usize,
    /// 1-indexed column of the first error
    pub column: usize,
    /// Short description
    pub message: String,
}

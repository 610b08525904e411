//! Source parsers
//!
//! Provides pluggable parsers that lower a source file into the
//! language-neutral [`syntax`] model:
//! - function definitions with decorators, parameters and return annotations
//! - expressions as a closed set of node kinds
//!
//! Parsers are selected by file extension through a [`ParserRegistry`].

mod python;
pub mod syntax;

use std::path::Path;

pub use python::{PythonParser, parse_module};
pub use syntax::{
    BoolOperator, Constant, Expr, FunctionDef, Keyword, ParamKind, Parameter, ParseError,
    SourceModule, Span,
};

/// A parser that lowers source text into a [`SourceModule`]
pub trait SourceParser: Send + Sync {
    /// Get the name of this parser (e.g., "python")
    fn name(&self) -> &str;

    /// Get file extensions this parser handles
    fn extensions(&self) -> &[&str];

    /// Parse source text
    fn parse(&self, source: &str) -> Result<SourceModule, ParseError>;
}

/// Registry of parsers by file extension
pub struct ParserRegistry {
    parsers: Vec<Box<dyn SourceParser>>,
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parsers", &self.parsers.iter().map(|p| p.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserRegistry {
    /// Create a new registry with built-in parsers
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(PythonParser)],
        }
    }

    /// Register a custom parser
    ///
    /// Later registrations win when extensions overlap.
    pub fn register(&mut self, parser: Box<dyn SourceParser>) {
        self.parsers.insert(0, parser);
    }

    /// Get a parser for a file path
    #[must_use]
    pub fn parser_for(&self, path: &Path) -> Option<&dyn SourceParser> {
        let ext = path.extension()?.to_str()?;
        self.parsers.iter().find(|p| p.extensions().contains(&ext)).map(AsRef::as_ref)
    }

    /// Get a parser by name
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&dyn SourceParser> {
        self.parsers.iter().find(|p| p.name() == name).map(AsRef::as_ref)
    }
}

//! Ignore rule sets
//!
//! One rule set per directory, read from that directory's ignore file.
//! Patterns are shell globs matched against a path relative to the
//! directory that owns the rule set.

use glob::{MatchOptions, Pattern};
use serde::Serialize;

/// A pattern line that is not a valid glob
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidPattern {
    /// 1-indexed line in the ignore file
    pub line: usize,
    /// The offending pattern
    pub pattern: String,
    /// Why it was rejected
    pub message: String,
}

/// Ordered glob patterns scoped to one directory
#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    patterns: Vec<Pattern>,
}

impl IgnoreRuleSet {
    /// Create an empty rule set (no ignore file)
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Parse ignore file content, one pattern per line
    ///
    /// Blank lines and `#` comments are skipped. A leading `/` is dropped since
    /// patterns are already anchored to their directory. Invalid globs are
    /// returned beside the rule set instead of failing the whole file.
    #[must_use]
    pub fn parse(content: &str) -> (Self, Vec<InvalidPattern>) {
        let mut patterns = Vec::new();
        let mut invalid = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim_end();
            if line.trim_start().is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix('/').unwrap_or(line);
            match Pattern::new(line) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => invalid.push(InvalidPattern {
                    line: idx + 1,
                    pattern: line.to_string(),
                    message: e.msg.to_string(),
                }),
            }
        }

        (Self { patterns }, invalid)
    }

    /// Check whether a path relative to the owning directory matches any
    /// pattern
    ///
    /// Separators are normalized to `/`; `*` may cross them, like `fnmatch`.
    #[must_use]
    pub fn is_ignored(&self, relative: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        let normalized = relative.replace('\\', "/");
        self.patterns.iter().any(|p| p.matches_with(&normalized, options))
    }

    /// Pattern strings in file order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Pattern::as_str)
    }

    /// Number of patterns
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if there are no patterns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

//! Parse errors with source locations.

use std::fmt;

use crate::span::Span;

/// Error produced when expression source is malformed.
///
/// Carries the 1-based line and column of the offending token; expressions
/// are usually embedded in larger templates, so the caller may offset these
/// against the directive's own position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    /// Build an error at a span within `source`.
    #[cold]
    pub fn at(source: &str, span: Span, message: impl Into<String>) -> Self {
        let (line, column) = span.line_column(source);
        ParseError {
            message: message.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {}, column {})", self.message, self.line, self.column)
    }
}

impl std::error::Error for ParseError {}

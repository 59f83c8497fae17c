//! Error types for path expression parsing.

use thiserror::Error;

/// Errors that can occur while parsing a path expression.
///
/// Parsing never partially succeeds: either the whole string parses into a
/// [`Path`](super::Path) or one of these errors is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathSyntaxError {
    /// The path string was empty.
    #[error("empty path")]
    Empty,
    /// Unexpected token at a specific position.
    #[error("unexpected token '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    #[error("invalid path syntax: {message}")]
    InvalidSyntax { message: String },
}

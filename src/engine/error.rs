//! Error types for traversal and construction.

use thiserror::Error;

/// Error returned by a caller-supplied transform function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransformError(pub String);

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        TransformError(message.into())
    }
}

/// Errors raised by strict-mode traversal.
///
/// In lenient mode none of these occur; missing or mismatched locations
/// surface as `Null` (or the configured default) instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraversalError {
    /// A mapping did not contain the requested key.
    #[error("key '{key}' not found")]
    KeyNotFound { key: String },
    /// A sequence index was out of range.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: isize, len: usize },
    /// A segment was applied to a value of the wrong shape.
    #[error("expected {expected} at '{segment}' but found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        segment: String,
    },
    /// A transform function failed.
    #[error("transform failed: {message}")]
    Transform { message: String },
}

/// Errors raised during construction (`put`).
///
/// `Unassignable` is raised in both modes; the rest only in strict mode,
/// with lenient mode returning the target unchanged instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// The path had no segments.
    #[error("empty path")]
    EmptyPath,
    /// The first segment was not a key, so there is no container to attach to.
    #[error("path must begin with a key segment")]
    RootNotKey,
    /// Wildcard, slice, and tuple segments never address a single slot.
    #[error("segment '{segment}' does not address a single slot")]
    Unassignable { segment: String },
    /// An existing value had the wrong shape for the path.
    #[error("expected {expected} at '{at}' but found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        at: String,
    },
    /// A negative index referred before the start of the sequence.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: isize, len: usize },
}

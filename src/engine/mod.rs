//! Traversal ("grab") and construction ("put") engines.
//!
//! Both engines consume a parsed [`Path`](crate::Path) and a
//! [`Value`](crate::Value) tree, and both are pure: sources are only read,
//! targets are cloned before being shaped. Strictness is a per-call policy,
//! so the same path/tree pair behaves identically every time under a given mode.

pub mod error;
pub mod grab;
pub mod put;

pub use error::{ConstructionError, TransformError, TraversalError};
pub use grab::Grab;
pub use put::put;

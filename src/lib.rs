//! pathquill - a path expression engine for nested data trees.
//!
//! Four tightly coupled pieces share one data model:
//!
//! - a [path mini-language](path) parsed into reusable [`Path`] values,
//! - a read-side traversal engine ([`Grab`]) that projects values out of a
//!   tree, with optional defaults, transforms, and strict-mode errors,
//! - a write-side construction engine ([`engine::put`]) that builds
//!   intermediate containers to set a value at a path,
//! - a [sentinel processor](process) that resolves DROP/KEEP markers and
//!   prunes empty values from producer output.
//!
//! Everything is purely functional over immutable inputs: paths are parsed
//! once and shared freely, sources are only read, and each operation returns
//! a fresh tree.
//!
//! # Example
//!
//! ```
//! use pathquill::{grab, put, Value};
//!
//! let source = Value::from(serde_json::json!({
//!     "patient": {
//!         "id": "123",
//!         "contacts": [{"system": "phone"}, {"system": "email"}],
//!     }
//! }));
//!
//! assert_eq!(grab(&source, "patient.id").unwrap(), Value::from("123"));
//! assert_eq!(
//!     grab(&source, "patient.contacts[*].system").unwrap(),
//!     Value::from(serde_json::json!(["phone", "email"]))
//! );
//!
//! let built = put(&Value::object(), "order.items[0].code", "A-1").unwrap();
//! assert_eq!(
//!     built,
//!     Value::from(serde_json::json!({"order": {"items": [{"code": "A-1"}]}}))
//! );
//! ```

pub mod engine;
pub mod path;
pub mod process;
pub mod tree;

pub use engine::{ConstructionError, Grab, TransformError, TraversalError};
pub use path::{Path, PathSegment, PathSyntaxError};
pub use process::{process, DepthExceededError, DropLevel};
pub use tree::{Number, SentinelError, Value};

use thiserror::Error;

/// Any error the string-path convenience API can produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] PathSyntaxError),
    #[error(transparent)]
    Traversal(#[from] TraversalError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Depth(#[from] DepthExceededError),
}

/// Reads the value at `path` from `source`, leniently.
///
/// Parses the path on every call; callers that reuse a path, need strict
/// mode, defaults, or transforms should parse once with [`Path::parse`] and
/// use [`Grab`] directly.
pub fn grab(source: &Value, path: &str) -> Result<Value, Error> {
    let path = Path::parse(path)?;
    let result = Grab::new(&path).eval(source)?;
    Ok(result)
}

/// Sets `value` at `path` inside a copy of `target`, leniently.
///
/// See [`engine::put`] for the parsed-path, strict-capable form.
pub fn put(target: &Value, path: &str, value: impl Into<Value>) -> Result<Value, Error> {
    let path = Path::parse(path)?;
    Ok(engine::put(target, &path, value, false)?)
}

//! Tree value representation.
//!
//! [`Value`] is the single data model shared by every engine in this crate:
//! grab reads from it, put builds it, and the sentinel processor rewrites it.
//! Mappings use [`IndexMap`] so field order survives construction and
//! processing.
//!
//! The two sentinel variants, [`Value::Drop`] and [`Value::Keep`], only have
//! meaning to [`process`](crate::process::process). Producers embed them in
//! an output tree; one processing pass consumes them. They must never appear
//! in a tree handed to grab or put, which treat them as opaque leaves.
//!
//! # Example
//!
//! ```
//! use pathquill::Value;
//!
//! let tree = Value::from(serde_json::json!({
//!     "name": "pathquill",
//!     "tags": ["path", "tree"],
//! }));
//! assert!(tree.is_object());
//! assert_eq!(tree.kind(), "mapping");
//! ```

use indexmap::IndexMap;

use crate::process::DropLevel;

/// A number in a tree, either integer or float.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// A tree value: the recursive sum type all engines operate on.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent / null value
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Numeric scalar
    Number(Number),
    /// String scalar
    String(String),
    /// Ordered sequence of values
    Array(Vec<Value>),
    /// Mapping of string keys to values, insertion-ordered
    Object(IndexMap<String, Value>),
    /// Removal sentinel, resolved by the processor
    Drop(DropLevel),
    /// Prune-exemption wrapper, unwrapped by the processor
    Keep(Box<Value>),
}

impl Value {
    /// Creates an empty mapping.
    pub fn object() -> Self {
        Value::Object(IndexMap::new())
    }

    /// Creates an empty sequence.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Wraps a value so the processor preserves it even when empty.
    ///
    /// # Example
    ///
    /// ```
    /// use pathquill::{process, Value};
    ///
    /// let mut tree = Value::object();
    /// if let Value::Object(fields) = &mut tree {
    ///     fields.insert("x".to_string(), Value::keep(Value::array()));
    ///     fields.insert("y".to_string(), Value::array());
    /// }
    /// let out = process(&tree, true).unwrap();
    /// // "y" is pruned, the kept "x" survives
    /// assert_eq!(out, Value::from(serde_json::json!({"x": []})));
    /// ```
    pub fn keep(value: impl Into<Value>) -> Self {
        Value::Keep(Box::new(value.into()))
    }

    /// Returns a short name for this value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "sequence",
            Value::Object(_) => "mapping",
            Value::Drop(_) => "drop sentinel",
            Value::Keep(_) => "keep wrapper",
        }
    }

    /// Returns true if this value is a mapping.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns true if this value is a sequence.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this value is a container (mapping or sequence).
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this value is empty: null, `{}`, `[]`, or `""`.
    ///
    /// This is the emptiness rule the processor uses when pruning.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the mapping if this is an object value.
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements if this is a sequence value.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::Integer(i as i64))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<DropLevel> for Value {
    fn from(level: DropLevel) -> Self {
        Value::Drop(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from(1).kind(), "number");
        assert_eq!(Value::object().kind(), "mapping");
        assert_eq!(Value::array().kind(), "sequence");
        assert_eq!(Value::keep(Value::Null).kind(), "keep wrapper");
    }

    #[test]
    fn test_is_empty() {
        assert!(Value::Null.is_empty());
        assert!(Value::object().is_empty());
        assert!(Value::array().is_empty());
        assert!(Value::from("").is_empty());
        assert!(!Value::from("x").is_empty());
        assert!(!Value::from(0).is_empty());
        assert!(!Value::from(false).is_empty());
    }

    #[test]
    fn test_number_accessors() {
        let int = Number::Integer(42);
        assert!(int.is_integer());
        assert_eq!(int.as_f64(), 42.0);
        assert_eq!(int.to_string(), "42");

        let float = Number::Float(1.5);
        assert!(float.is_float());
        assert_eq!(float.to_string(), "1.5");
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Value::from("a"), Value::String("a".to_string()));
        assert_eq!(Value::from(3), Value::Number(Number::Integer(3)));
        assert_eq!(Value::from(true), Value::Bool(true));
    }
}

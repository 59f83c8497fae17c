//! Write-side path construction engine.
//!
//! [`put`] sets a value at a path, creating intermediate containers of the
//! right shape along the way. The target is never mutated: the engine clones
//! it, builds into the clone, and returns it.
//!
//! Only `Key` and `Index` segments address a single slot, so those are the
//! only segments a put path may contain, and the first must be a `Key` (a
//! bare index has no parent container to attach to). During descent the
//! engine looks one segment ahead to decide whether a missing slot becomes a
//! mapping or a sequence; positive indices past the end auto-grow the
//! sequence with `Null` padding.
//!
//! # Example
//!
//! ```
//! use pathquill::{Path, Value};
//! use pathquill::engine::put;
//!
//! let path = Path::parse("items[1].name").unwrap();
//! let built = put(&Value::object(), &path, "Aspirin", false).unwrap();
//! assert_eq!(
//!     built,
//!     Value::from(serde_json::json!({"items": [null, {"name": "Aspirin"}]}))
//! );
//! ```

use crate::path::{Path, PathSegment};
use crate::tree::Value;

use super::error::ConstructionError;

/// Sets `value` at `path` inside a copy of `target` and returns the copy.
///
/// Lenient mode turns every recoverable failure into a no-op returning an
/// unchanged copy of `target`; strict mode surfaces it as a
/// [`ConstructionError`]. Wildcard, slice, and tuple segments are rejected in
/// both modes.
pub fn put(
    target: &Value,
    path: &Path,
    value: impl Into<Value>,
    strict: bool,
) -> Result<Value, ConstructionError> {
    if let Err(err) = validate(path) {
        // Unassignable segments are a caller bug in either mode.
        if strict || matches!(err, ConstructionError::Unassignable { .. }) {
            return Err(err);
        }
        return Ok(target.clone());
    }

    let mut result = target.clone();
    match build(&mut result, path.segments(), value.into(), strict) {
        Ok(()) => Ok(result),
        Err(err) if strict => Err(err),
        // The clone may be partially shaped; hand back an untouched copy.
        Err(_) => Ok(target.clone()),
    }
}

/// A put path must be non-empty, contain only keys and indices, and start
/// with a key.
fn validate(path: &Path) -> Result<(), ConstructionError> {
    for segment in path.segments() {
        if matches!(
            segment,
            PathSegment::Wildcard | PathSegment::Slice(_, _) | PathSegment::Tuple(_)
        ) {
            return Err(ConstructionError::Unassignable {
                segment: segment.to_string(),
            });
        }
    }
    match path.segments().first() {
        None => Err(ConstructionError::EmptyPath),
        Some(PathSegment::Key(_)) => Ok(()),
        Some(_) => Err(ConstructionError::RootNotKey),
    }
}

fn build(
    root: &mut Value,
    segments: &[PathSegment],
    value: Value,
    strict: bool,
) -> Result<(), ConstructionError> {
    let (last, descent) = match segments.split_last() {
        Some(split) => split,
        None => return Err(ConstructionError::EmptyPath),
    };

    let mut current = root;
    for (i, segment) in descent.iter().enumerate() {
        let next = &segments[i + 1];
        current = match segment {
            PathSegment::Key(name) => descend_key(current, name, next, strict)?,
            PathSegment::Index(idx) => descend_index(current, *idx, next, strict)?,
            other => {
                return Err(ConstructionError::Unassignable {
                    segment: other.to_string(),
                })
            }
        };
    }

    assign(current, last, value)
}

/// Shape a missing slot needs so the following segment can descend into it.
fn container_for(next: &PathSegment) -> Value {
    match next {
        PathSegment::Index(_) => Value::array(),
        _ => Value::object(),
    }
}

fn shape_matches(value: &Value, next: &PathSegment) -> bool {
    match next {
        PathSegment::Index(_) => value.is_array(),
        _ => value.is_object(),
    }
}

fn descend_key<'t>(
    current: &'t mut Value,
    name: &str,
    next: &PathSegment,
    strict: bool,
) -> Result<&'t mut Value, ConstructionError> {
    let map = match current {
        Value::Object(map) => map,
        other => {
            return Err(ConstructionError::TypeMismatch {
                expected: "mapping",
                found: other.kind(),
                at: name.to_string(),
            })
        }
    };

    let slot = map
        .entry(name.to_string())
        .or_insert_with(|| container_for(next));
    if !shape_matches(slot, next) {
        if strict {
            return Err(ConstructionError::TypeMismatch {
                expected: container_for(next).kind(),
                found: slot.kind(),
                at: name.to_string(),
            });
        }
        *slot = container_for(next);
    }
    Ok(slot)
}

fn descend_index<'t>(
    current: &'t mut Value,
    idx: isize,
    next: &PathSegment,
    strict: bool,
) -> Result<&'t mut Value, ConstructionError> {
    let items = match current {
        Value::Array(items) => items,
        other => {
            return Err(ConstructionError::TypeMismatch {
                expected: "sequence",
                found: other.kind(),
                at: format!("[{}]", idx),
            })
        }
    };

    let slot = grow_to(items, idx)?;
    if slot.is_null() {
        *slot = container_for(next);
    } else if !shape_matches(slot, next) {
        if strict {
            return Err(ConstructionError::TypeMismatch {
                expected: container_for(next).kind(),
                found: slot.kind(),
                at: format!("[{}]", idx),
            });
        }
        *slot = container_for(next);
    }
    Ok(slot)
}

/// Resolves `idx` in `items`, padding with `Null` for positive indices past
/// the end. Negative indices count from the end and never grow the sequence.
fn grow_to(items: &mut Vec<Value>, idx: isize) -> Result<&mut Value, ConstructionError> {
    let resolved = if idx >= 0 {
        let idx = idx as usize;
        while items.len() <= idx {
            items.push(Value::Null);
        }
        idx
    } else {
        let len = items.len() as isize;
        let normalized = len + idx;
        if normalized < 0 {
            return Err(ConstructionError::IndexOutOfRange {
                index: idx,
                len: items.len(),
            });
        }
        normalized as usize
    };
    Ok(&mut items[resolved])
}

/// Terminal assignment: overwriting the leaf slot is unconditionally allowed.
fn assign(current: &mut Value, last: &PathSegment, value: Value) -> Result<(), ConstructionError> {
    match last {
        PathSegment::Key(name) => {
            let map = match current {
                Value::Object(map) => map,
                other => {
                    return Err(ConstructionError::TypeMismatch {
                        expected: "mapping",
                        found: other.kind(),
                        at: name.to_string(),
                    })
                }
            };
            map.insert(name.to_string(), value);
            Ok(())
        }
        PathSegment::Index(idx) => {
            let items = match current {
                Value::Array(items) => items,
                other => {
                    return Err(ConstructionError::TypeMismatch {
                        expected: "sequence",
                        found: other.kind(),
                        at: format!("[{}]", idx),
                    })
                }
            };
            let slot = grow_to(items, *idx)?;
            *slot = value;
            Ok(())
        }
        other => Err(ConstructionError::Unassignable {
            segment: other.to_string(),
        }),
    }
}

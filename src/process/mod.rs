//! Output post-processing: DROP resolution, KEEP unwrapping, empty-pruning.
//!
//! Producers of output trees can embed two sentinels:
//!
//! - [`Value::Drop`] requests removal of the entry/element holding it, or of
//!   an enclosing container, depending on its [`DropLevel`] rank.
//! - [`Value::Keep`] exempts its inner value from empty-pruning. Nested DROP
//!   markers inside a kept value still resolve normally.
//!
//! One [`process`] pass resolves every sentinel and, when `prune_empty` is
//! set, removes empty values (`Null`, `{}`, `[]`, `""`) bottom-up. The
//! returned tree is fully materialized and sentinel-free.
//!
//! Removal signals travel upward as an ordinary tagged return value, not via
//! panics or errors; the only failure is a marker asking to climb past the
//! root, which is a [`DepthExceededError`].

mod sentinel;

pub use sentinel::{DepthExceededError, DropLevel};

use crate::tree::Value;

/// Result of visiting one value: a materialized replacement, or a removal
/// signal still climbing toward its target container.
enum Visit {
    Value(Value),
    Drop(usize),
}

/// Resolves DROP/KEEP sentinels in `tree` and optionally prunes empties.
///
/// # Example
///
/// ```
/// use pathquill::{process, DropLevel, Value};
///
/// // A producer marks a branch for removal of its enclosing container.
/// let mut tree = Value::from(serde_json::json!({"a": {"b": {}}}));
/// if let Value::Object(map) = &mut tree {
///     if let Some(Value::Object(inner)) = map.get_mut("a") {
///         inner.insert(
///             "b".to_string(),
///             Value::Drop(DropLevel::Parent),
///         );
///     }
/// }
/// assert_eq!(process(&tree, true).unwrap(), Value::object());
/// ```
pub fn process(tree: &Value, prune_empty: bool) -> Result<Value, DepthExceededError> {
    match visit(tree, prune_empty) {
        Visit::Value(value) => Ok(value),
        Visit::Drop(0) => Ok(match tree {
            // The root container itself was dropped; nothing above it exists,
            // so materialize an empty value of the same shape.
            Value::Object(_) => Value::object(),
            Value::Array(_) => Value::array(),
            _ => Value::Null,
        }),
        Visit::Drop(levels) => Err(DepthExceededError { levels }),
    }
}

fn visit(value: &Value, prune: bool) -> Visit {
    match value {
        Value::Drop(level) => Visit::Drop(level.rank()),
        // KEEP is transparent to DROP resolution but shields its subtree
        // from pruning.
        Value::Keep(inner) => visit(inner, false),
        Value::Object(map) => {
            let mut out = indexmap::IndexMap::with_capacity(map.len());
            for (key, child) in map {
                let exempt = matches!(child, Value::Keep(_));
                match visit(child, prune) {
                    Visit::Value(processed) => {
                        if prune && !exempt && processed.is_empty() {
                            continue;
                        }
                        out.insert(key.clone(), processed);
                    }
                    // Rank spent: remove just this entry.
                    Visit::Drop(0) => continue,
                    // This mapping itself is being removed; siblings are moot.
                    Visit::Drop(levels) => return Visit::Drop(levels - 1),
                }
            }
            Visit::Value(Value::Object(out))
        }
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for child in items {
                let exempt = matches!(child, Value::Keep(_));
                match visit(child, prune) {
                    Visit::Value(processed) => {
                        if prune && !exempt && processed.is_empty() {
                            continue;
                        }
                        out.push(processed);
                    }
                    Visit::Drop(0) => continue,
                    Visit::Drop(levels) => return Visit::Drop(levels - 1),
                }
            }
            Visit::Value(Value::Array(out))
        }
        scalar => {
            if prune && scalar.is_empty() {
                Visit::Value(Value::Null)
            } else {
                Visit::Value(scalar.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_plain_tree_passes_through() {
        let input = tree(json!({"a": 1, "b": [true, "x"]}));
        assert_eq!(process(&input, false).unwrap(), input);
    }

    #[test]
    fn test_prune_removes_empty_values() {
        let input = tree(json!({
            "keep": "value",
            "null": null,
            "empty_map": {},
            "empty_list": [],
            "empty_string": "",
        }));
        assert_eq!(
            process(&input, true).unwrap(),
            tree(json!({"keep": "value"}))
        );
    }

    #[test]
    fn test_prune_cascades_bottom_up() {
        // Pruning the inner leaves empties the outer containers too.
        let input = tree(json!({"a": {"b": {"c": null}}, "d": 1}));
        assert_eq!(process(&input, true).unwrap(), tree(json!({"d": 1})));
    }

    #[test]
    fn test_drop_entry_in_mapping() {
        let mut input = tree(json!({"good": 1}));
        if let Value::Object(map) = &mut input {
            map.insert("bad".to_string(), Value::Drop(DropLevel::ThisObject));
        }
        assert_eq!(process(&input, true).unwrap(), tree(json!({"good": 1})));
    }

    #[test]
    fn test_drop_root_yields_empty_container() {
        let mut input = tree(json!({"a": 1}));
        if let Value::Object(map) = &mut input {
            map.insert("b".to_string(), Value::Drop(DropLevel::Parent));
        }
        assert_eq!(process(&input, true).unwrap(), Value::object());
    }

    #[test]
    fn test_drop_past_root_is_fatal() {
        let mut input = tree(json!({}));
        if let Value::Object(map) = &mut input {
            map.insert("a".to_string(), Value::Drop(DropLevel::GreatGrandparent));
        }
        let err = process(&input, true).unwrap_err();
        assert_eq!(err, DepthExceededError { levels: 2 });
    }

    #[test]
    fn test_keep_exempts_from_pruning() {
        let mut input = tree(json!({"y": []}));
        if let Value::Object(map) = &mut input {
            map.insert("x".to_string(), Value::keep(Value::array()));
        }
        assert_eq!(process(&input, true).unwrap(), tree(json!({"x": []})));
    }

    #[test]
    fn test_scalar_root_empty_string_prunes_to_null() {
        assert_eq!(process(&Value::from(""), true).unwrap(), Value::Null);
        assert_eq!(process(&Value::from(""), false).unwrap(), Value::from(""));
    }
}

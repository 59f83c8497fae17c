//! Integration tests for the sentinel processor.

use indexmap::IndexMap;
use pathquill::{process, DepthExceededError, DropLevel, Value};
use serde_json::json;

/// Builds a mapping from (key, value) pairs.
fn object(entries: Vec<(&str, Value)>) -> Value {
    let mut map = IndexMap::new();
    for (key, value) in entries {
        map.insert(key.to_string(), value);
    }
    Value::Object(map)
}

fn drop_marker(level: DropLevel) -> Value {
    Value::Drop(level)
}

/// Rank 0 in a mapping removes just that entry.
#[test]
fn test_drop_this_removes_entry() {
    let tree = object(vec![
        ("keep", Value::from(1)),
        ("toss", drop_marker(DropLevel::ThisObject)),
    ]);
    assert_eq!(process(&tree, true).unwrap(), Value::from(json!({"keep": 1})));
}

/// Rank 0 as a bare sequence element removes only that element.
#[test]
fn test_drop_this_in_sequence_is_element_local() {
    let tree = object(vec![(
        "items",
        Value::Array(vec![
            Value::from("first"),
            drop_marker(DropLevel::ThisObject),
            Value::from("third"),
        ]),
    )]);
    assert_eq!(
        process(&tree, true).unwrap(),
        Value::from(json!({"items": ["first", "third"]}))
    );
}

/// Rank 1 removes the container holding the marker.
#[test]
fn test_drop_parent_removes_container() {
    let tree = object(vec![
        (
            "dropped",
            object(vec![
                ("trigger", drop_marker(DropLevel::Parent)),
                ("ignored", Value::from("x")),
            ]),
        ),
        ("kept", Value::from("y")),
    ]);
    assert_eq!(process(&tree, true).unwrap(), Value::from(json!({"kept": "y"})));
}

/// Rank 1 from inside a sequence element removes that element's mapping.
#[test]
fn test_drop_parent_inside_sequence_element() {
    let tree = object(vec![(
        "items",
        Value::Array(vec![
            object(vec![("bad", drop_marker(DropLevel::Parent))]),
            object(vec![("good", Value::from("value"))]),
        ]),
    )]);
    assert_eq!(
        process(&tree, true).unwrap(),
        Value::from(json!({"items": [{"good": "value"}]}))
    );
}

/// A grandparent drop three levels down removes the outermost key.
#[test]
fn test_drop_grandparent_boundary() {
    let tree = object(vec![(
        "a",
        object(vec![("b", object(vec![("c", drop_marker(DropLevel::Grandparent))]))]),
    )]);
    assert_eq!(process(&tree, true).unwrap(), Value::object());
}

/// Propagation past the structural root is always fatal.
#[test]
fn test_drop_past_root_fails() {
    let tree = object(vec![("a", drop_marker(DropLevel::GreatGrandparent))]);
    let err = process(&tree, true).unwrap_err();
    assert_eq!(err, DepthExceededError { levels: 2 });

    // prune_empty has no bearing on the failure.
    assert!(process(&tree, false).is_err());
}

/// A drop resolving exactly at the root empties the root container,
/// preserving its shape.
#[test]
fn test_drop_at_root_matches_root_shape() {
    let map_root = object(vec![("a", drop_marker(DropLevel::Parent))]);
    assert_eq!(process(&map_root, true).unwrap(), Value::object());

    let seq_root = Value::Array(vec![drop_marker(DropLevel::Parent)]);
    assert_eq!(process(&seq_root, true).unwrap(), Value::array());
}

/// Siblings after a container-removing marker are never materialized, but
/// siblings of the *entry-local* rank survive.
#[test]
fn test_drop_short_circuits_enclosing_container_only() {
    let tree = object(vec![(
        "outer",
        object(vec![
            ("before", Value::from(1)),
            ("trigger", drop_marker(DropLevel::Parent)),
            ("after", Value::from(2)),
        ]),
    )]);
    assert_eq!(process(&tree, true).unwrap(), Value::object());
}

/// KEEP exempts from pruning but not from nested DROP resolution.
#[test]
fn test_keep_exemption() {
    let tree = object(vec![
        ("x", Value::keep(Value::array())),
        ("y", Value::array()),
    ]);
    assert_eq!(process(&tree, true).unwrap(), Value::from(json!({"x": []})));
}

/// KEEP preserves empty scalars and nulls verbatim.
#[test]
fn test_keep_preserves_empty_scalars() {
    let tree = object(vec![
        ("s", Value::keep("")),
        ("n", Value::keep(Value::Null)),
        ("gone", Value::from("")),
    ]);
    assert_eq!(
        process(&tree, true).unwrap(),
        Value::from(json!({"s": "", "n": null}))
    );
}

/// DROP markers nested inside a KEEP still resolve.
#[test]
fn test_keep_does_not_shield_drops() {
    let tree = object(vec![(
        "kept",
        Value::keep(object(vec![
            ("stay", Value::from(1)),
            ("go", drop_marker(DropLevel::ThisObject)),
        ])),
    )]);
    assert_eq!(
        process(&tree, true).unwrap(),
        Value::from(json!({"kept": {"stay": 1}}))
    );
}

/// Empty-pruning removes empties bottom-up, cascading through containers.
#[test]
fn test_prune_cascade() {
    let tree = Value::from(json!({
        "a": {"b": {"c": null, "d": ""}},
        "e": [[], {}],
        "f": "value",
    }));
    assert_eq!(process(&tree, true).unwrap(), Value::from(json!({"f": "value"})));
}

/// With pruning off, empties survive untouched.
#[test]
fn test_prune_disabled() {
    let tree = Value::from(json!({"a": {}, "b": [], "c": "", "d": null}));
    assert_eq!(process(&tree, false).unwrap(), tree);
}

/// Processing an already-processed tree is a no-op (pruning idempotence).
#[test]
fn test_process_idempotent_after_first_pass() {
    let tree = Value::from(json!({
        "a": {"b": null, "c": [1, "", {}]},
        "d": ["x", [], "y"],
    }));
    let once = process(&tree, true).unwrap();
    let twice = process(&once, true).unwrap();
    assert_eq!(once, twice);
}

//! DROP and KEEP sentinel definitions.

use thiserror::Error;

/// How many ancestor containers a DROP marker removes.
///
/// A marker with rank 0 removes only the entry or element holding it; each
/// higher rank removes one more enclosing container. Ranks are resolved by
/// [`process`](super::process); a rank that would propagate past the
/// structural root is a producer bug and fails the whole pass.
///
/// # Example
///
/// ```
/// use pathquill::{process, DropLevel, Value};
///
/// let mut tree = Value::from(serde_json::json!({"items": ["first", "second"]}));
/// if let Value::Object(map) = &mut tree {
///     if let Some(Value::Array(items)) = map.get_mut("items") {
///         items[1] = Value::Drop(DropLevel::ThisObject);
///     }
/// }
/// let out = process(&tree, true).unwrap();
/// assert_eq!(out, Value::from(serde_json::json!({"items": ["first"]})));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DropLevel {
    /// Remove the entry or element holding the marker.
    ThisObject,
    /// Remove the container holding the marker.
    Parent,
    /// Remove the container one level above that.
    Grandparent,
    /// Remove the container two levels above that.
    GreatGrandparent,
}

impl DropLevel {
    /// Number of levels the removal signal climbs before taking effect.
    pub fn rank(self) -> usize {
        match self {
            DropLevel::ThisObject => 0,
            DropLevel::Parent => 1,
            DropLevel::Grandparent => 2,
            DropLevel::GreatGrandparent => 3,
        }
    }
}

/// A DROP marker requested removal past the structural root.
///
/// Always fatal, independent of any strict/lenient setting elsewhere: the
/// tree producer asked for an ancestor that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("drop level exceeds structure depth ({levels} level(s) past the root)")]
pub struct DepthExceededError {
    /// Levels left to climb when the root was reached.
    pub levels: usize,
}

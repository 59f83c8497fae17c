//! Read-side traversal engine.
//!
//! [`Grab`] interprets a parsed [`Path`] against a source tree. Traversal
//! keeps a working set of values: each segment maps every item in the set to
//! zero or more successors. A single surviving item is returned directly; a
//! fanned-out set comes back as a sequence, which is how a wildcard (or an
//! implicit broadcast over a sequence) turns a single-value access into a
//! list-of-values access.
//!
//! A bare key applied to a sequence always broadcasts element-wise, producing
//! one result per element; `[*]` is only needed to fan a sequence out ahead
//! of a non-key segment.
//!
//! # Example
//!
//! ```
//! use pathquill::{Grab, Path, Value};
//!
//! let source = Value::from(serde_json::json!({
//!     "contacts": [{"system": "phone"}, {"system": "email"}],
//! }));
//!
//! let path = Path::parse("contacts[*].system").unwrap();
//! let systems = Grab::new(&path).eval(&source).unwrap();
//! assert_eq!(systems, Value::from(serde_json::json!(["phone", "email"])));
//! ```

use std::borrow::Cow;

use crate::path::{Path, PathSegment};
use crate::tree::Value;

use super::error::{TransformError, TraversalError};

type TransformFn<'a> = Box<dyn Fn(Value) -> Result<Value, TransformError> + 'a>;

/// A configured traversal of one path.
///
/// Construction is cheap; the same `Grab` can be evaluated against many
/// sources. Strictness, a default value, and transform functions are all
/// optional.
pub struct Grab<'a> {
    path: &'a Path,
    default: Option<Value>,
    strict: bool,
    transforms: Vec<TransformFn<'a>>,
}

impl<'a> Grab<'a> {
    /// Creates a lenient traversal of `path`.
    pub fn new(path: &'a Path) -> Self {
        Self {
            path,
            default: None,
            strict: false,
            transforms: Vec::new(),
        }
    }

    /// Sets strict mode: missing keys, bad indices, and shape mismatches
    /// become errors instead of `Null`.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Substitutes `default` when the final result is `Null`.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Appends a transform to run on the final value.
    ///
    /// Transforms run in order on the result, whether it came from the tree
    /// or from the substituted default. The first failing transform ends the
    /// chain: strict mode surfaces it as [`TraversalError::Transform`],
    /// lenient mode yields `Null`.
    pub fn transform(
        mut self,
        f: impl Fn(Value) -> Result<Value, TransformError> + 'a,
    ) -> Self {
        self.transforms.push(Box::new(f));
        self
    }

    /// Evaluates the traversal against `source`.
    ///
    /// In lenient mode this never fails for missing or mismatched data.
    pub fn eval(&self, source: &Value) -> Result<Value, TraversalError> {
        let mut result = self.traverse(source, self.path)?;

        if result.is_null() {
            if let Some(default) = &self.default {
                result = default.clone();
            }
        }

        for transform in &self.transforms {
            match transform(result) {
                Ok(value) => result = value,
                Err(err) if self.strict => {
                    return Err(TraversalError::Transform { message: err.0 })
                }
                Err(_) => return Ok(Value::Null),
            }
        }

        Ok(result)
    }

    fn traverse(&self, source: &Value, path: &Path) -> Result<Value, TraversalError> {
        let mut current: Vec<Cow<'_, Value>> = vec![Cow::Borrowed(source)];

        for segment in path.segments() {
            let mut next = Vec::with_capacity(current.len());
            for item in current {
                self.step(item, segment, &mut next)?;
            }
            current = next;
        }

        if current.len() == 1 {
            Ok(current.swap_remove(0).into_owned())
        } else {
            Ok(Value::Array(current.into_iter().map(Cow::into_owned).collect()))
        }
    }

    fn step<'s>(
        &self,
        item: Cow<'s, Value>,
        segment: &PathSegment,
        out: &mut Vec<Cow<'s, Value>>,
    ) -> Result<(), TraversalError> {
        match segment {
            PathSegment::Key(name) => self.step_key(item, name, out),
            PathSegment::Index(idx) => {
                out.push(self.index(item, *idx)?);
                Ok(())
            }
            PathSegment::Slice(start, end) => {
                out.push(self.slice(item, *start, *end)?);
                Ok(())
            }
            PathSegment::Wildcard => self.step_wildcard(item, out),
            PathSegment::Tuple(paths) => {
                let mut results = Vec::with_capacity(paths.len());
                for path in paths {
                    results.push(self.traverse(item.as_ref(), path)?);
                }
                out.push(Cow::Owned(Value::Array(results)));
                Ok(())
            }
        }
    }

    /// Key access; sequences broadcast the lookup over their elements, each
    /// result landing in its own working-set slot.
    fn step_key<'s>(
        &self,
        item: Cow<'s, Value>,
        name: &str,
        out: &mut Vec<Cow<'s, Value>>,
    ) -> Result<(), TraversalError> {
        match item {
            Cow::Borrowed(Value::Array(items)) => {
                for element in items {
                    out.push(self.field(Cow::Borrowed(element), name)?);
                }
                Ok(())
            }
            Cow::Owned(Value::Array(items)) => {
                for element in items {
                    out.push(self.field(Cow::Owned(element), name)?);
                }
                Ok(())
            }
            other => {
                out.push(self.field(other, name)?);
                Ok(())
            }
        }
    }

    fn field<'s>(
        &self,
        item: Cow<'s, Value>,
        name: &str,
    ) -> Result<Cow<'s, Value>, TraversalError> {
        match item {
            Cow::Borrowed(Value::Object(map)) => match map.get(name) {
                Some(child) => Ok(Cow::Borrowed(child)),
                None => self.missing(TraversalError::KeyNotFound {
                    key: name.to_string(),
                }),
            },
            Cow::Owned(Value::Object(mut map)) => match map.swap_remove(name) {
                Some(child) => Ok(Cow::Owned(child)),
                None => self.missing(TraversalError::KeyNotFound {
                    key: name.to_string(),
                }),
            },
            other => self.missing(TraversalError::TypeMismatch {
                expected: "mapping",
                found: other.kind(),
                segment: name.to_string(),
            }),
        }
    }

    fn index<'s>(
        &self,
        item: Cow<'s, Value>,
        idx: isize,
    ) -> Result<Cow<'s, Value>, TraversalError> {
        match item {
            Cow::Borrowed(Value::Array(items)) => match normalize_index(idx, items.len()) {
                Some(i) => Ok(Cow::Borrowed(&items[i])),
                None => self.missing(TraversalError::IndexOutOfRange {
                    index: idx,
                    len: items.len(),
                }),
            },
            Cow::Owned(Value::Array(mut items)) => match normalize_index(idx, items.len()) {
                Some(i) => Ok(Cow::Owned(items.swap_remove(i))),
                None => self.missing(TraversalError::IndexOutOfRange {
                    index: idx,
                    len: items.len(),
                }),
            },
            other => self.missing(TraversalError::TypeMismatch {
                expected: "sequence",
                found: other.kind(),
                segment: format!("[{}]", idx),
            }),
        }
    }

    /// Slice bounds clamp and never error; only a shape mismatch can fail,
    /// and only in strict mode.
    fn slice<'s>(
        &self,
        item: Cow<'s, Value>,
        start: Option<isize>,
        end: Option<isize>,
    ) -> Result<Cow<'s, Value>, TraversalError> {
        match item {
            Cow::Borrowed(Value::Array(items)) => {
                let (s, e) = clamp_slice(start, end, items.len());
                Ok(Cow::Owned(Value::Array(items[s..e].to_vec())))
            }
            Cow::Owned(Value::Array(mut items)) => {
                let (s, e) = clamp_slice(start, end, items.len());
                let selected: Vec<Value> = items.drain(s..e).collect();
                Ok(Cow::Owned(Value::Array(selected)))
            }
            other => self.missing(TraversalError::TypeMismatch {
                expected: "sequence",
                found: other.kind(),
                segment: PathSegment::Slice(start, end).to_string(),
            }),
        }
    }

    /// Wildcard fan-out: every element gets its own working-set slot.
    fn step_wildcard<'s>(
        &self,
        item: Cow<'s, Value>,
        out: &mut Vec<Cow<'s, Value>>,
    ) -> Result<(), TraversalError> {
        match item {
            Cow::Borrowed(Value::Array(items)) => {
                for element in items {
                    out.push(Cow::Borrowed(element));
                }
                Ok(())
            }
            Cow::Owned(Value::Array(items)) => {
                for element in items {
                    out.push(Cow::Owned(element));
                }
                Ok(())
            }
            other => {
                out.push(self.missing(TraversalError::TypeMismatch {
                    expected: "sequence",
                    found: other.kind(),
                    segment: "[*]".to_string(),
                })?);
                Ok(())
            }
        }
    }

    fn missing<'s>(&self, err: TraversalError) -> Result<Cow<'s, Value>, TraversalError> {
        if self.strict {
            Err(err)
        } else {
            Ok(Cow::Owned(Value::Null))
        }
    }
}

fn normalize_index(idx: isize, len: usize) -> Option<usize> {
    let len = len as isize;
    let normalized = if idx < 0 { len + idx } else { idx };
    if normalized >= 0 && normalized < len {
        Some(normalized as usize)
    } else {
        None
    }
}

fn clamp_slice(start: Option<isize>, end: Option<isize>, len: usize) -> (usize, usize) {
    let len_i = len as isize;
    let s = match start {
        Some(s) if s < 0 => (len_i + s).max(0) as usize,
        Some(s) => s.min(len_i) as usize,
        None => 0,
    };
    let e = match end {
        Some(e) if e < 0 => (len_i + e).max(0) as usize,
        Some(e) => e.min(len_i) as usize,
        None => len,
    };
    (s, e.max(s))
}

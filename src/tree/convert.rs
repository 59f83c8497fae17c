//! Conversions between [`Value`] and `serde_json::Value`.
//!
//! JSON is the lingua franca for trees produced by external collaborators;
//! these conversions let callers build sources with `serde_json::json!` and
//! hand finished trees back to the serde ecosystem. Converting *to* JSON
//! fails if a DROP/KEEP sentinel is still present, since sentinels have no
//! external representation and must be resolved by
//! [`process`](crate::process::process) first.

use indexmap::IndexMap;
use thiserror::Error;

use super::value::{Number, Value};

/// A DROP/KEEP sentinel survived into a tree being exported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} has no external representation; run process() first")]
pub struct SentinelError {
    pub kind: &'static str,
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Number(Number::Integer(i)),
                None => Value::Number(Number::Float(n.as_f64().unwrap_or(f64::MAX))),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut fields = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    fields.insert(key, Value::from(value));
                }
                Value::Object(fields)
            }
        }
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = SentinelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(b)),
            Value::Number(Number::Integer(i)) => Ok(serde_json::Value::from(i)),
            Value::Number(Number::Float(f)) => Ok(serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null)),
            Value::String(s) => Ok(serde_json::Value::String(s)),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(serde_json::Value::try_from(item)?);
                }
                Ok(serde_json::Value::Array(out))
            }
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key, serde_json::Value::try_from(value)?);
                }
                Ok(serde_json::Value::Object(out))
            }
            Value::Drop(_) | Value::Keep(_) => Err(SentinelError { kind: value.kind() }),
        }
    }
}

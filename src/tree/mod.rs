//! Tree value model shared by every engine in the crate.

pub mod convert;
mod serde_impl;
pub mod value;

pub use convert::SentinelError;
pub use value::{Number, Value};

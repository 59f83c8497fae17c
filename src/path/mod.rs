//! Path expression grammar and parser.
//!
//! A path expression addresses a location (or set of locations) inside a
//! nested tree of mappings and sequences.
//!
//! # Supported Syntax
//!
//! - `key` - Named field access (`[A-Za-z_][A-Za-z0-9_-]*`)
//! - `a.b.c` - Nested field access
//! - `[index]` - Sequence index (supports negative indices)
//! - `[start:end]` - Sequence slicing, half-open, either bound omittable
//! - `[*]` - All elements (wildcard fan-out)
//! - `(a,b.c)` - Tuple of sub-paths evaluated against the same value
//!
//! Brackets attach directly to the preceding key (`items[0][1]`); a dot is
//! only needed between a key/bracket and the next key. A path may also begin
//! with a bracket chain (`[-1]`, `[*].name`) when the root value is a
//! sequence.
//!
//! # Examples
//!
//! ```
//! // patient.id                  - nested field
//! // items[0].name               - index then field
//! // items[*].code               - one code per element
//! // contacts[-1]                - last element
//! // (id,name.given)             - pair of values from one source
//! ```

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{Path, PathSegment};
pub use error::PathSyntaxError;
pub use parser::Parser;

//! Abstract syntax tree types for path expressions.

use std::fmt;
use std::str::FromStr;

use super::error::PathSyntaxError;
use super::parser::Parser;

/// A segment in a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named field access (`name`)
    Key(String),
    /// Sequence index (`[0]`, `[-1]`)
    Index(isize),
    /// Sequence sub-range with half-open bounds (`[1:3]`, `[:2]`, `[1:]`)
    Slice(Option<isize>, Option<isize>),
    /// All elements of a sequence (`[*]`)
    Wildcard,
    /// Parenthesized group of sub-paths evaluated against the same value (`(a,b.c)`)
    Tuple(Vec<Path>),
}

/// A complete, parsed path expression.
///
/// A `Path` is immutable once parsed and can be reused across any number of
/// grab/put calls, including from multiple threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Creates a path from pre-built segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parses a path expression string.
    ///
    /// # Example
    ///
    /// ```
    /// use pathquill::{Path, PathSegment};
    ///
    /// let path = Path::parse("items[0].name").unwrap();
    /// assert_eq!(path.segments().len(), 3);
    /// assert_eq!(path.segments()[1], PathSegment::Index(0));
    /// ```
    pub fn parse(input: &str) -> Result<Self, PathSyntaxError> {
        Parser::parse(input)
    }

    /// Returns the segments that make up the path.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl FromStr for Path {
    type Err = PathSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
            PathSegment::Slice(start, end) => {
                write!(f, "[")?;
                if let Some(s) = start {
                    write!(f, "{}", s)?;
                }
                write!(f, ":")?;
                if let Some(e) = end {
                    write!(f, "{}", e)?;
                }
                write!(f, "]")
            }
            PathSegment::Wildcard => write!(f, "[*]"),
            PathSegment::Tuple(paths) => {
                write!(f, "(")?;
                for (i, path) in paths.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", path)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            // Brackets attach directly; keys and tuples need a dot separator.
            if i > 0 && !matches!(segment, PathSegment::Index(_) | PathSegment::Slice(_, _) | PathSegment::Wildcard) {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_source_form() {
        for text in ["a.b.c", "items[0].name", "items[*]", "a[-1][1:3]", "(id,name.given)[0:2]"] {
            let path = Path::parse(text).unwrap();
            assert_eq!(path.to_string(), text);
        }
    }

    #[test]
    fn test_from_str() {
        let path: Path = "a.b[2]".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("a".to_string()),
                PathSegment::Key("b".to_string()),
                PathSegment::Index(2),
            ]
        );
    }
}

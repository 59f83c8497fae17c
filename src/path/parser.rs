//! Path expression string parser.

use super::ast::{Path, PathSegment};
use super::error::PathSyntaxError;

/// Recursive-descent parser for path expression strings.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given path string.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Parses the path string into a [`Path`].
    pub fn parse(input: &str) -> Result<Path, PathSyntaxError> {
        if input.is_empty() {
            return Err(PathSyntaxError::Empty);
        }
        let mut parser = Parser::new(input);
        let path = parser.parse_path(false)?;
        // Anything left over means the grammar stopped before the end.
        if let Some(ch) = parser.peek() {
            return Err(PathSyntaxError::UnexpectedToken {
                position: parser.position,
                found: ch.to_string(),
                expected: "'.', '[', or end of path".to_string(),
            });
        }
        Ok(path)
    }

    /// Parses a path: one or more steps separated by dots, where each step is
    /// a key, a tuple, or a bracket chain, each optionally followed by more
    /// brackets. When `in_tuple` is set, a top-level ',' or ')' ends the path.
    fn parse_path(&mut self, in_tuple: bool) -> Result<Path, PathSyntaxError> {
        let mut segments = Vec::new();

        loop {
            self.parse_step(&mut segments)?;

            if in_tuple && matches!(self.peek(), Some(',') | Some(')')) {
                break;
            }
            match self.peek() {
                Some('.') => {
                    self.next();
                }
                _ => break,
            }
        }

        Ok(Path::new(segments))
    }

    /// Parses a single step at a segment boundary.
    fn parse_step(&mut self, segments: &mut Vec<PathSegment>) -> Result<(), PathSyntaxError> {
        match self.peek() {
            Some('(') => {
                segments.push(self.parse_tuple()?);
            }
            Some('[') => {}
            Some(ch) if is_key_start(ch) => {
                segments.push(PathSegment::Key(self.parse_key()?));
            }
            Some(ch) => {
                return Err(PathSyntaxError::UnexpectedToken {
                    position: self.position,
                    found: ch.to_string(),
                    expected: "key, '(', or '['".to_string(),
                });
            }
            None => {
                return Err(PathSyntaxError::UnexpectedEnd {
                    expected: "path segment".to_string(),
                });
            }
        }

        // Zero or more bracket operations attach without a dot.
        while self.peek() == Some('[') {
            segments.push(self.parse_bracket()?);
        }
        Ok(())
    }

    /// Parses an identifier: `[A-Za-z_][A-Za-z0-9_-]*`.
    fn parse_key(&mut self) -> Result<String, PathSyntaxError> {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            Err(PathSyntaxError::InvalidSyntax {
                message: "expected identifier".to_string(),
            })
        } else {
            Ok(name)
        }
    }

    /// Parses one bracket operation: `[index]`, `[start:end]`, or `[*]`.
    fn parse_bracket(&mut self) -> Result<PathSegment, PathSyntaxError> {
        self.expect('[')?;

        let segment = match self.peek() {
            Some('*') => {
                self.next();
                PathSegment::Wildcard
            }
            Some(':') | Some('-') | Some('0'..='9') => {
                let start = if self.peek() == Some(':') {
                    None
                } else {
                    Some(self.parse_number()?)
                };
                if self.peek() == Some(':') {
                    self.next();
                    let end = if self.peek() == Some(']') {
                        None
                    } else {
                        Some(self.parse_number()?)
                    };
                    PathSegment::Slice(start, end)
                } else {
                    match start {
                        Some(idx) => PathSegment::Index(idx),
                        None => {
                            return Err(PathSyntaxError::InvalidSyntax {
                                message: "expected index".to_string(),
                            })
                        }
                    }
                }
            }
            Some(ch) => {
                return Err(PathSyntaxError::UnexpectedToken {
                    position: self.position,
                    found: ch.to_string(),
                    expected: "index, slice, or '*'".to_string(),
                });
            }
            None => {
                return Err(PathSyntaxError::UnexpectedEnd {
                    expected: "']'".to_string(),
                });
            }
        };

        self.expect(']')?;
        Ok(segment)
    }

    /// Parses a tuple: `(path,path,...)`. Sub-paths are parsed recursively,
    /// so commas inside nested tuples attach to the right level.
    fn parse_tuple(&mut self) -> Result<PathSegment, PathSyntaxError> {
        self.expect('(')?;
        let mut paths = Vec::new();

        loop {
            self.skip_whitespace();
            paths.push(self.parse_path(true)?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.next();
                }
                Some(')') => {
                    self.next();
                    break;
                }
                Some(ch) => {
                    return Err(PathSyntaxError::UnexpectedToken {
                        position: self.position,
                        found: ch.to_string(),
                        expected: "',' or ')'".to_string(),
                    });
                }
                None => {
                    return Err(PathSyntaxError::UnexpectedEnd {
                        expected: "')'".to_string(),
                    });
                }
            }
        }

        Ok(PathSegment::Tuple(paths))
    }

    /// Parses a possibly negative integer.
    fn parse_number(&mut self) -> Result<isize, PathSyntaxError> {
        let start = self.position;
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.next();
        }
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if text.is_empty() || text == "-" {
            return Err(PathSyntaxError::UnexpectedToken {
                position: start,
                found: self.peek().map(|c| c.to_string()).unwrap_or_default(),
                expected: "number".to_string(),
            });
        }
        text.parse::<isize>()
            .map_err(|_| PathSyntaxError::InvalidSyntax {
                message: format!("invalid number: {}", text),
            })
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Skips whitespace characters (allowed around tuple parts only).
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), PathSyntaxError> {
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(PathSyntaxError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(PathSyntaxError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }
}

fn is_key_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_key() {
        let path = Parser::parse("name").unwrap();
        assert_eq!(path.segments(), &[PathSegment::Key("name".to_string())]);
    }

    #[test]
    fn test_parse_dotted_keys() {
        let path = Parser::parse("data.patient.id").unwrap();
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.segments()[0], PathSegment::Key("data".to_string()));
        assert_eq!(path.segments()[2], PathSegment::Key("id".to_string()));
    }

    #[test]
    fn test_parse_key_with_dash_and_underscore() {
        let path = Parser::parse("my-key._private").unwrap();
        assert_eq!(path.segments()[0], PathSegment::Key("my-key".to_string()));
        assert_eq!(path.segments()[1], PathSegment::Key("_private".to_string()));
    }

    #[test]
    fn test_parse_index() {
        let path = Parser::parse("items[0]").unwrap();
        assert_eq!(
            path.segments(),
            &[PathSegment::Key("items".to_string()), PathSegment::Index(0)]
        );
    }

    #[test]
    fn test_parse_negative_index() {
        let path = Parser::parse("items[-1]").unwrap();
        assert_eq!(path.segments()[1], PathSegment::Index(-1));
    }

    #[test]
    fn test_parse_chained_brackets() {
        let path = Parser::parse("matrix[0][1]").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("matrix".to_string()),
                PathSegment::Index(0),
                PathSegment::Index(1),
            ]
        );
    }

    #[test]
    fn test_parse_bracket_then_key() {
        let path = Parser::parse("items[0].name").unwrap();
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.segments()[2], PathSegment::Key("name".to_string()));
    }

    #[test]
    fn test_parse_wildcard() {
        let path = Parser::parse("items[*].name").unwrap();
        assert_eq!(path.segments()[1], PathSegment::Wildcard);
    }

    #[test]
    fn test_parse_slice_full() {
        let path = Parser::parse("items[1:3]").unwrap();
        assert_eq!(path.segments()[1], PathSegment::Slice(Some(1), Some(3)));
    }

    #[test]
    fn test_parse_slice_open_ends() {
        let path = Parser::parse("items[:2]").unwrap();
        assert_eq!(path.segments()[1], PathSegment::Slice(None, Some(2)));

        let path = Parser::parse("items[1:]").unwrap();
        assert_eq!(path.segments()[1], PathSegment::Slice(Some(1), None));

        let path = Parser::parse("items[:]").unwrap();
        assert_eq!(path.segments()[1], PathSegment::Slice(None, None));
    }

    #[test]
    fn test_parse_negative_slice() {
        let path = Parser::parse("items[-2:-1]").unwrap();
        assert_eq!(path.segments()[1], PathSegment::Slice(Some(-2), Some(-1)));
    }

    #[test]
    fn test_parse_leading_bracket() {
        let path = Parser::parse("[-1]").unwrap();
        assert_eq!(path.segments(), &[PathSegment::Index(-1)]);

        let path = Parser::parse("[*].field").unwrap();
        assert_eq!(
            path.segments(),
            &[PathSegment::Wildcard, PathSegment::Key("field".to_string())]
        );
    }

    #[test]
    fn test_parse_tuple() {
        let path = Parser::parse("(id,name)").unwrap();
        assert_eq!(path.segments().len(), 1);
        match &path.segments()[0] {
            PathSegment::Tuple(paths) => {
                assert_eq!(paths.len(), 2);
                assert_eq!(paths[0].segments(), &[PathSegment::Key("id".to_string())]);
            }
            other => panic!("expected tuple, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_tuple_with_nested_paths() {
        let path = Parser::parse("(id, patient.name.given)").unwrap();
        match &path.segments()[0] {
            PathSegment::Tuple(paths) => {
                assert_eq!(paths[1].segments().len(), 3);
            }
            other => panic!("expected tuple, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_tuple_commas_attach_correctly() {
        let path = Parser::parse("(a,(b,c).x)").unwrap();
        match &path.segments()[0] {
            PathSegment::Tuple(paths) => {
                assert_eq!(paths.len(), 2);
                match &paths[1].segments()[0] {
                    PathSegment::Tuple(inner) => assert_eq!(inner.len(), 2),
                    other => panic!("expected inner tuple, got {:?}", other),
                }
            }
            other => panic!("expected tuple, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_tuple_after_key() {
        let path = Parser::parse("patient.(id,name)").unwrap();
        assert_eq!(path.segments().len(), 2);
        assert!(matches!(path.segments()[1], PathSegment::Tuple(_)));
    }

    #[test]
    fn test_parse_empty_fails() {
        assert_eq!(Parser::parse(""), Err(PathSyntaxError::Empty));
    }

    #[test]
    fn test_parse_empty_tuple_fails() {
        assert!(Parser::parse("()").is_err());
    }

    #[test]
    fn test_parse_unmatched_paren_fails() {
        assert!(Parser::parse("(a,b").is_err());
    }

    #[test]
    fn test_parse_unmatched_bracket_fails() {
        assert!(Parser::parse("items[0").is_err());
        assert!(Parser::parse("items[").is_err());
    }

    #[test]
    fn test_parse_malformed_bracket_fails() {
        assert!(Parser::parse("items[abc]").is_err());
        assert!(Parser::parse("items[-]").is_err());
    }

    #[test]
    fn test_parse_trailing_garbage_fails() {
        assert!(Parser::parse("a.b!").is_err());
        assert!(Parser::parse("a..b").is_err());
    }

    #[test]
    fn test_parse_trailing_dot_fails() {
        assert!(Parser::parse("a.").is_err());
    }
}

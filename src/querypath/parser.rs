//! Path query string parser.
//!
//! Grammar:
//!
//! ```text
//! path    := segment ('.' segment)*
//! segment := key bracket* | bracket+      (bracket-only form only first)
//! bracket := '[' ( '*' | digits ) ']'
//! ```

use super::ast::{ParsedPath, PathSegment};
use crate::error::QueryError;
use log::trace;

/// Parser for path query strings.
pub struct Parser {
    chars: Vec<char>,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given query string.
    pub fn new(query: &str) -> Self {
        Self {
            chars: query.trim().chars().collect(),
            position: 0,
        }
    }

    /// Parses the query string into a ParsedPath.
    ///
    /// An empty (or all-whitespace) query yields an empty path.
    pub fn parse(query: &str) -> Result<ParsedPath, QueryError> {
        let mut parser = Parser::new(query);
        let path = parser.parse_path()?;
        trace!("parsed path {:?} into {} segments", query, path.segments.len());
        Ok(path)
    }

    fn parse_path(&mut self) -> Result<ParsedPath, QueryError> {
        let mut segments = Vec::new();
        if self.is_eof() {
            return Ok(ParsedPath::new(segments));
        }

        let mut previous_start: Option<usize> = None;
        loop {
            let start = self.position;
            let name = self.parse_identifier();

            if !name.is_empty() {
                segments.push(PathSegment::Key(name));
            } else if start != 0 || self.peek() != Some('[') {
                let segment = match previous_start {
                    Some(prev) => self.text(prev, start),
                    None => self.text(start, self.chars.len()),
                };
                return Err(QueryError::path_syntax(segment, "expected a key"));
            }

            while self.peek() == Some('[') {
                segments.push(self.parse_bracket_expression(start)?);
            }

            match self.next() {
                None => break,
                Some('.') => previous_start = Some(start),
                Some(ch) => {
                    return Err(QueryError::path_syntax(
                        self.segment_text(start),
                        format!("unexpected character '{}'", ch),
                    ))
                }
            }
        }

        Ok(ParsedPath::new(segments))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Checks if we've reached the end of input.
    fn is_eof(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end.min(self.chars.len())].iter().collect()
    }

    /// The dotted segment beginning at `start`, for error messages.
    fn segment_text(&self, start: usize) -> String {
        let mut depth = 0usize;
        let mut end = start;
        while let Some(&ch) = self.chars.get(end) {
            match ch {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '.' if depth == 0 => break,
                _ => {}
            }
            end += 1;
        }
        self.text(start, end)
    }

    /// Parses a key name: everything up to the next `.`, `[` or `]`.
    fn parse_identifier(&mut self) -> String {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch == '.' || ch == '[' || ch == ']' {
                break;
            }
            name.push(ch);
            self.next();
        }
        name
    }

    /// Parses `[*]` or `[index]`.
    fn parse_bracket_expression(&mut self, segment_start: usize) -> Result<PathSegment, QueryError> {
        self.next(); // '['
        let mut content = String::new();
        loop {
            match self.next() {
                Some(']') => break,
                Some(ch) => content.push(ch),
                None => {
                    return Err(QueryError::path_syntax(
                        self.segment_text(segment_start),
                        "unterminated '['",
                    ))
                }
            }
        }

        let content = content.trim();
        if content == "*" {
            return Ok(PathSegment::Wildcard);
        }
        if content.is_empty() || !content.chars().all(|c| c.is_ascii_digit()) {
            return Err(QueryError::path_syntax(
                self.segment_text(segment_start),
                format!("expected a non-negative index or '*', found '{}'", content),
            ));
        }
        content
            .parse::<usize>()
            .map(PathSegment::Index)
            .map_err(|_| {
                QueryError::path_syntax(
                    self.segment_text(segment_start),
                    format!("index {} is too large", content),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> PathSegment {
        PathSegment::Key(name.to_string())
    }

    fn syntax_segment(query: &str) -> String {
        match Parser::parse(query) {
            Err(QueryError::PathSyntax { segment, .. }) => segment,
            other => panic!("expected syntax error for {:?}, got {:?}", query, other),
        }
    }

    #[test]
    fn test_parse_empty() {
        let path = Parser::parse("").unwrap();
        assert!(path.is_empty());
        assert!(Parser::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_bare_key() {
        let path = Parser::parse("users").unwrap();
        assert_eq!(path.segments, vec![key("users")]);
    }

    #[test]
    fn test_parse_nested_keys() {
        let path = Parser::parse("data.users.name").unwrap();
        assert_eq!(path.segments, vec![key("data"), key("users"), key("name")]);
    }

    #[test]
    fn test_parse_index_and_wildcard() {
        let path = Parser::parse("users[0].profile[*].email").unwrap();
        assert_eq!(
            path.segments,
            vec![
                key("users"),
                PathSegment::Index(0),
                key("profile"),
                PathSegment::Wildcard,
                key("email"),
            ]
        );
    }

    #[test]
    fn test_parse_root_index() {
        let path = Parser::parse("[0]").unwrap();
        assert_eq!(path.segments, vec![PathSegment::Index(0)]);

        let path = Parser::parse("[*].name").unwrap();
        assert_eq!(path.segments, vec![PathSegment::Wildcard, key("name")]);
    }

    #[test]
    fn test_parse_repeated_brackets() {
        let path = Parser::parse("matrix[1][*]").unwrap();
        assert_eq!(
            path.segments,
            vec![key("matrix"), PathSegment::Index(1), PathSegment::Wildcard]
        );
    }

    #[test]
    fn test_parse_whitespace_inside_brackets() {
        let path = Parser::parse("items[ 2 ]").unwrap();
        assert_eq!(path.segments, vec![key("items"), PathSegment::Index(2)]);
    }

    #[test]
    fn test_parse_non_numeric_index_fails() {
        assert_eq!(syntax_segment("users[abc].name"), "users[abc]");
    }

    #[test]
    fn test_parse_negative_index_fails() {
        assert_eq!(syntax_segment("items[-1]"), "items[-1]");
    }

    #[test]
    fn test_parse_unterminated_bracket_fails() {
        assert_eq!(syntax_segment("a.items[0"), "items[0");
    }

    #[test]
    fn test_parse_empty_brackets_fail() {
        assert_eq!(syntax_segment("items[]"), "items[]");
    }

    #[test]
    fn test_parse_empty_segment_fails() {
        assert_eq!(syntax_segment("a..b"), "a.");
        assert_eq!(syntax_segment("a."), "a.");
        assert_eq!(syntax_segment(".a"), ".a");
    }

    #[test]
    fn test_parse_text_after_bracket_fails() {
        assert_eq!(syntax_segment("users[0]name"), "users[0]name");
    }

    #[test]
    fn test_parse_bracket_after_dot_fails() {
        assert!(Parser::parse("users.[0]").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let query = "users[0].profile[*].email";
        assert_eq!(Parser::parse(query).unwrap().to_string(), query);
    }
}

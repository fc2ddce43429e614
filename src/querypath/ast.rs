//! Parsed form of a path query.

use std::fmt;

/// A segment in a path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named object member (`name`)
    Key(String),
    /// Array element (`[0]`)
    Index(usize),
    /// Every element of an array (`[*]`)
    Wildcard,
}

impl PathSegment {
    /// Whether this segment is written in brackets.
    fn is_bracketed(&self) -> bool {
        !matches!(self, PathSegment::Key(_))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
            PathSegment::Wildcard => write!(f, "[*]"),
        }
    }
}

/// A complete path query. An empty path selects the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPath {
    /// Segments in the order they are applied.
    pub segments: Vec<PathSegment>,
}

impl ParsedPath {
    /// Creates a new path with the given segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments.contains(&PathSegment::Wildcard)
    }

    /// Renders the first `len` segments back into path syntax.
    pub fn prefix(&self, len: usize) -> String {
        render(&self.segments[..len.min(self.segments.len())])
    }
}

impl fmt::Display for ParsedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(&self.segments))
    }
}

fn render(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 && !segment.is_bracketed() {
            out.push('.');
        }
        out.push_str(&segment.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mixed_segments() {
        let path = ParsedPath::new(vec![
            PathSegment::Key("users".to_string()),
            PathSegment::Wildcard,
            PathSegment::Key("tags".to_string()),
            PathSegment::Index(1),
        ]);
        assert_eq!(path.to_string(), "users[*].tags[1]");
        assert_eq!(path.prefix(2), "users[*]");
        assert_eq!(path.prefix(0), "");
    }

    #[test]
    fn test_root_index_renders_without_dot() {
        let path = ParsedPath::new(vec![PathSegment::Index(0), PathSegment::Key("id".to_string())]);
        assert_eq!(path.to_string(), "[0].id");
    }
}

//! Walks a [`Value`] tree along a parsed path.
//!
//! Until the first wildcard the walk follows exactly one value, and any miss
//! is an error. Once a wildcard fans out, the walk follows many values and
//! elements that miss a later segment are dropped instead.

use super::ast::{ParsedPath, PathSegment};
use crate::document::node::Value;
use crate::error::QueryError;
use log::{debug, trace};

/// Values selected by a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'a> {
    /// No wildcard was applied: exactly one value.
    Single(&'a Value),
    /// A wildcard was applied: every match, in document order.
    Many(Vec<&'a Value>),
}

impl<'a> Selection<'a> {
    pub fn len(&self) -> usize {
        match self {
            Selection::Single(_) => 1,
            Selection::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the selected values as a list.
    pub fn values(&self) -> Vec<&'a Value> {
        match self {
            Selection::Single(value) => vec![*value],
            Selection::Many(values) => values.clone(),
        }
    }

    /// Copies the selection out of the source tree. A wildcard selection
    /// becomes an array.
    pub fn to_value(&self) -> Value {
        match self {
            Selection::Single(value) => (*value).clone(),
            Selection::Many(values) => {
                Value::Array(values.iter().map(|v| (*v).clone()).collect())
            }
        }
    }
}

pub struct Evaluator<'a> {
    root: &'a Value,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a Value) -> Self {
        Evaluator { root }
    }

    /// Evaluates `path` against the root value.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::PathNotFound`] when a segment applied before any
    /// wildcard misses: a key absent from (or applied to something other
    /// than) an object, an index out of range or applied to a non-array, or a
    /// wildcard applied to a non-array.
    pub fn evaluate(&self, path: &ParsedPath) -> Result<Selection<'a>, QueryError> {
        let mut current = Selection::Single(self.root);

        for (position, segment) in path.segments.iter().enumerate() {
            current = match current {
                Selection::Single(value) => match self.step(value, segment) {
                    Some(next) => next,
                    None => {
                        return Err(QueryError::PathNotFound {
                            prefix: path.prefix(position),
                            segment: segment.to_string(),
                        })
                    }
                },
                Selection::Many(values) => {
                    let before = values.len();
                    let mut next = Vec::new();
                    for value in values {
                        match self.step(value, segment) {
                            Some(Selection::Single(v)) => next.push(v),
                            Some(Selection::Many(vs)) => next.extend(vs),
                            None => {}
                        }
                    }
                    trace!(
                        "segment {} kept {} of {} values",
                        segment,
                        next.len(),
                        before
                    );
                    Selection::Many(next)
                }
            };
        }

        debug!("path '{}' selected {} value(s)", path, current.len());
        Ok(current)
    }

    /// Applies one segment to one value. `None` means the segment does not
    /// apply to this value.
    fn step(&self, value: &'a Value, segment: &PathSegment) -> Option<Selection<'a>> {
        match segment {
            PathSegment::Key(name) => value.get(name).map(Selection::Single),
            PathSegment::Index(idx) => value.get_index(*idx).map(Selection::Single),
            PathSegment::Wildcard => match value {
                Value::Array(items) => Some(Selection::Many(items.iter().collect())),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::json::decode_json;
    use crate::querypath::parser::Parser;

    fn eval<'a>(doc: &'a Value, query: &str) -> Result<Selection<'a>, QueryError> {
        Evaluator::new(doc).evaluate(&Parser::parse(query).unwrap())
    }

    fn users() -> Value {
        decode_json(r#"{"users":[{"name":"John","age":30},{"name":"Jane","age":25}]}"#).unwrap()
    }

    #[test]
    fn test_empty_path_returns_root() {
        let doc = users();
        assert_eq!(eval(&doc, "").unwrap(), Selection::Single(&doc));
    }

    #[test]
    fn test_key_and_index() {
        let doc = users();
        let result = eval(&doc, "users[1].name").unwrap();
        assert_eq!(result, Selection::Single(&Value::from("Jane")));
    }

    #[test]
    fn test_wildcard_collects_in_order() {
        let doc = users();
        let result = eval(&doc, "users[*].name").unwrap();
        assert_eq!(result.to_value(), decode_json(r#"["John","Jane"]"#).unwrap());
    }

    #[test]
    fn test_wildcard_drops_elements_missing_trailing_key() {
        let doc = decode_json(r#"{"items":[{"id":1},{"other":2},3,{"id":4}]}"#).unwrap();
        let result = eval(&doc, "items[*].id").unwrap();
        assert_eq!(result.to_value(), decode_json("[1,4]").unwrap());
    }

    #[test]
    fn test_wildcard_over_empty_array() {
        let doc = decode_json(r#"{"items":[]}"#).unwrap();
        let result = eval(&doc, "items[*]").unwrap();
        assert!(result.is_empty());
        assert!(matches!(result, Selection::Many(_)));
    }

    #[test]
    fn test_nested_wildcards_concatenate() {
        let doc = decode_json(r#"{"m":[[1,2],[3],"x",[4]]}"#).unwrap();
        let result = eval(&doc, "m[*][*]").unwrap();
        assert_eq!(result.to_value(), decode_json("[1,2,3,4]").unwrap());
    }

    #[test]
    fn test_index_after_wildcard_drops_out_of_range() {
        let doc = decode_json(r#"{"rows":[[1,2],[3]]}"#).unwrap();
        let result = eval(&doc, "rows[*][1]").unwrap();
        assert_eq!(result.to_value(), decode_json("[2]").unwrap());
    }

    #[test]
    fn test_root_level_array() {
        let doc = decode_json(r#"[{"id":7},{"id":8}]"#).unwrap();
        assert_eq!(eval(&doc, "[1].id").unwrap(), Selection::Single(&Value::from(8)));
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let doc = decode_json(r#"{"a":{"b":1}}"#).unwrap();
        let err = eval(&doc, "a.c").unwrap_err();
        assert_eq!(
            err,
            QueryError::PathNotFound {
                prefix: "a".to_string(),
                segment: "c".to_string(),
            }
        );
    }

    #[test]
    fn test_explicit_null_is_found() {
        let doc = decode_json(r#"{"a":null}"#).unwrap();
        assert_eq!(eval(&doc, "a").unwrap(), Selection::Single(&Value::Null));
    }

    #[test]
    fn test_index_out_of_range_is_not_found() {
        let doc = users();
        let err = eval(&doc, "users[5].name").unwrap_err();
        assert_eq!(
            err,
            QueryError::PathNotFound {
                prefix: "users".to_string(),
                segment: "[5]".to_string(),
            }
        );
    }

    #[test]
    fn test_key_on_array_is_not_found() {
        let doc = users();
        assert!(matches!(
            eval(&doc, "users.name"),
            Err(QueryError::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_wildcard_on_object_is_not_found() {
        let doc = decode_json(r#"{"a":{"b":1}}"#).unwrap();
        let err = eval(&doc, "a[*]").unwrap_err();
        assert_eq!(
            err,
            QueryError::PathNotFound {
                prefix: "a".to_string(),
                segment: "[*]".to_string(),
            }
        );
    }

    #[test]
    fn test_source_tree_is_untouched() {
        let doc = users();
        let before = doc.clone();
        let _ = eval(&doc, "users[*].age").unwrap();
        assert_eq!(doc, before);
    }
}

//! Regex search over every string in a document.

use crate::document::node::Value;
use crate::error::QueryError;
use regex::{Regex, RegexBuilder};

/// A string leaf that matched a search pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Location in path syntax, e.g. `users[0].email`.
    pub path: String,
    pub text: String,
}

/// Finds every string in `value` matching `pattern`, in document order.
///
/// Matching is unanchored and case-insensitive unless `case_sensitive` is set.
///
/// # Errors
///
/// Returns [`QueryError::InvalidPattern`] if `pattern` does not compile.
///
/// # Example
///
/// ```
/// use jsonquery::document::decode_json;
/// use jsonquery::search::search;
///
/// let doc = decode_json(r#"{"users":[{"email":"a@Example.com"}]}"#).unwrap();
/// let hits = search(&doc, "example", false).unwrap();
/// assert_eq!(hits[0].path, "users[0].email");
/// ```
pub fn search(
    value: &Value,
    pattern: &str,
    case_sensitive: bool,
) -> Result<Vec<SearchHit>, QueryError> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|err| QueryError::invalid_pattern(pattern, &err))?;

    let mut hits = Vec::new();
    walk(value, &regex, String::new(), &mut hits);
    Ok(hits)
}

fn walk(value: &Value, regex: &Regex, path: String, hits: &mut Vec<SearchHit>) {
    match value {
        Value::Object(entries) => {
            for (key, child) in entries {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                walk(child, regex, child_path, hits);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                walk(child, regex, format!("{}[{}]", path, idx), hits);
            }
        }
        Value::String(text) if regex.is_match(text) => hits.push(SearchHit {
            path,
            text: text.clone(),
        }),
        _ => {}
    }
}

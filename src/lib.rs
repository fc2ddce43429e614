//! JSONQuery - query JSON and YAML documents with a compact path syntax.
//!
//! The library decodes a document into a [`Value`] tree, selects part of it
//! with a path such as `users[*].email`, and optionally narrows a list with a
//! filter such as `age > 25`.
//!
//! # Example
//!
//! ```
//! use jsonquery::{decode_json, evaluate_filter, evaluate_path, parse_filter, parse_path};
//!
//! let doc = decode_json(r#"{"users":[{"name":"John","age":30},{"name":"Jane","age":25}]}"#)?;
//!
//! let names = evaluate_path(&doc, &parse_path("users[*].name")?)?;
//! assert_eq!(names.to_value().to_json_string(), r#"["John","Jane"]"#);
//!
//! let users = evaluate_path(&doc, &parse_path("users[*]")?)?;
//! let older = evaluate_filter(users.values(), &parse_filter("age > 25")?);
//! assert_eq!(older.len(), 1);
//! # Ok::<(), jsonquery::QueryError>(())
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod file;
pub mod filter;
pub mod output;
pub mod querypath;
pub mod search;
pub mod stats;

pub use document::{Number, Value};
pub use error::{DecodeError, QueryError};
pub use filter::{Operator, Predicate};
pub use querypath::{ParsedPath, PathSegment, Selection};

/// Decodes JSON text into a [`Value`].
pub fn decode_json(text: &str) -> Result<Value, DecodeError> {
    document::decode_json(text)
}

/// Decodes text in the supported YAML subset into a [`Value`].
pub fn decode_yaml(text: &str) -> Result<Value, DecodeError> {
    document::decode_yaml(text)
}

/// Parses a path query such as `users[0].profile[*].email`.
pub fn parse_path(text: &str) -> Result<ParsedPath, QueryError> {
    querypath::Parser::parse(text)
}

/// Walks `root` along `path`.
///
/// Returns a single value when the path has no wildcard and every element
/// of a wildcard fan-out otherwise.
pub fn evaluate_path<'a>(root: &'a Value, path: &ParsedPath) -> Result<Selection<'a>, QueryError> {
    querypath::Evaluator::new(root).evaluate(path)
}

/// Parses a filter expression such as `age > 25`.
pub fn parse_filter(text: &str) -> Result<Predicate, QueryError> {
    filter::parse_filter(text)
}

/// Keeps the elements of `elements` that satisfy `predicate`.
pub fn evaluate_filter<'a, I>(elements: I, predicate: &Predicate) -> Vec<&'a Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    filter::evaluate_filter(elements, predicate)
}

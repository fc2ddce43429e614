//! Filter expressions: `field OP literal` tests applied to lists of objects.
//!
//! ```
//! use jsonquery::document::decode_json;
//! use jsonquery::filter::parse_filter;
//!
//! let pred = parse_filter("name ~ ^J").unwrap();
//! assert!(pred.matches(&decode_json(r#"{"name":"Jane"}"#).unwrap()));
//! ```

pub mod ast;
pub mod evaluator;
pub mod parser;

pub use ast::{Operator, Predicate};
pub use evaluator::{evaluate_filter, filter_selection};
pub use parser::parse_filter;

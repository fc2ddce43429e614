//! Path queries over decoded documents.
//!
//! # Supported Syntax
//!
//! - `name` - Object member
//! - `a.b.c` - Nested members
//! - `[index]` - Array element (non-negative)
//! - `[*]` - Every array element (wildcard)
//! - `[0].name` - Leading brackets index a root-level array
//! - empty string - The whole document
//!
//! # Examples
//!
//! ```
//! use jsonquery::document::decode_json;
//! use jsonquery::querypath::{Evaluator, Parser};
//!
//! let doc = decode_json(r#"{"users":[{"name":"John"},{"name":"Jane"}]}"#).unwrap();
//! let path = Parser::parse("users[*].name").unwrap();
//! let names = Evaluator::new(&doc).evaluate(&path).unwrap();
//! assert_eq!(names.len(), 2);
//! ```

pub mod ast;
pub mod evaluator;
pub mod parser;

pub use ast::{ParsedPath, PathSegment};
pub use evaluator::{Evaluator, Selection};
pub use parser::Parser;

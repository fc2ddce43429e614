//! Filter expression parser.
//!
//! ```text
//! filter := field operator literal
//! field  := bare name, no '.'
//! operator := '==' | '!=' | '>' | '<' | '>=' | '<=' | '~'
//! ```
//!
//! Whitespace around the operator is optional. The literal is typed by
//! [`classify_scalar`], the same rules YAML scalars use; for `~` it is kept
//! as pattern text.

use super::ast::{Operator, Predicate};
use crate::document::node::Value;
use crate::document::scalar::{classify_scalar, unquote};
use crate::error::QueryError;
use log::debug;

const OPERATOR_CHARS: [char; 5] = ['=', '!', '<', '>', '~'];

fn is_operator_char(ch: char) -> bool {
    OPERATOR_CHARS.contains(&ch)
}

/// Parses `field OP literal` into a [`Predicate`].
///
/// # Errors
///
/// - [`QueryError::FilterSyntax`] when the field name is empty or dotted, the
///   operator is not one of the seven supported symbols, or the literal is
///   missing.
/// - [`QueryError::InvalidPattern`] when a `~` pattern does not compile.
///
/// # Example
///
/// ```
/// use jsonquery::filter::{parse_filter, Operator};
/// use jsonquery::document::Value;
///
/// let pred = parse_filter("age > 25").unwrap();
/// assert_eq!(pred.field, "age");
/// assert_eq!(pred.operator, Operator::Gt);
/// assert_eq!(pred.literal, Value::from(25));
/// ```
pub fn parse_filter(expression: &str) -> Result<Predicate, QueryError> {
    let expression = expression.trim();

    let field_end = expression
        .find(|c: char| is_operator_char(c) || c.is_whitespace())
        .unwrap_or(expression.len());
    let field = &expression[..field_end];
    if field.is_empty() {
        return Err(QueryError::filter_syntax(format!(
            "missing field name in '{}'",
            expression
        )));
    }
    if field.contains('.') {
        return Err(QueryError::filter_syntax(format!(
            "field '{}' must be a plain name; nested paths are not supported",
            field
        )));
    }

    let rest = expression[field_end..].trim_start();
    let symbol_len = rest
        .find(|c: char| !is_operator_char(c))
        .unwrap_or(rest.len());
    let symbol = &rest[..symbol_len];
    if symbol.is_empty() {
        return Err(QueryError::filter_syntax(format!(
            "expected an operator after '{}' (one of == != > < >= <= ~)",
            field
        )));
    }
    let operator = Operator::from_symbol(symbol).ok_or_else(|| {
        QueryError::filter_syntax(format!(
            "unknown operator '{}' (expected one of == != > < >= <= ~)",
            symbol
        ))
    })?;

    let literal_text = rest[symbol_len..].trim();
    if literal_text.is_empty() {
        return Err(QueryError::filter_syntax(format!(
            "missing value after '{} {}'",
            field, operator
        )));
    }

    let literal = match operator {
        Operator::RegexMatch => {
            Value::String(unquote(literal_text).unwrap_or_else(|| literal_text.to_string()))
        }
        _ => classify_scalar(literal_text),
    };

    let predicate = Predicate::new(field, operator, literal)?;
    debug!("parsed filter {}", predicate);
    Ok(predicate)
}

//! Applies a [`Predicate`] to a list of values.

use super::ast::{Operator, Predicate};
use crate::document::node::Value;
use crate::querypath::Selection;
use log::debug;

impl Predicate {
    /// Tests one element.
    ///
    /// Only objects can match. A missing field never matches, ordering
    /// operators need a number on both sides, and `~` needs a string field.
    pub fn matches(&self, element: &Value) -> bool {
        let Some(field) = element.get(&self.field) else {
            return false;
        };

        match self.operator {
            Operator::Eq => *field == self.literal,
            Operator::Ne => *field != self.literal,
            Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le => {
                let (Some(lhs), Some(rhs)) = (field.as_number(), self.literal.as_number()) else {
                    return false;
                };
                match self.operator {
                    Operator::Gt => lhs > rhs,
                    Operator::Lt => lhs < rhs,
                    Operator::Ge => lhs >= rhs,
                    _ => lhs <= rhs,
                }
            }
            Operator::RegexMatch => match (field.as_str(), self.pattern()) {
                (Some(text), Some(pattern)) => pattern.is_match(text),
                _ => false,
            },
        }
    }
}

/// Keeps the elements that satisfy `predicate`, in input order.
///
/// # Example
///
/// ```
/// use jsonquery::document::{decode_json, Value};
/// use jsonquery::filter::{evaluate_filter, parse_filter};
///
/// let people = decode_json(r#"[{"age":30},{"age":25}]"#).unwrap();
/// let Value::Array(items) = &people else { unreachable!() };
/// let kept = evaluate_filter(items, &parse_filter("age > 25").unwrap());
/// assert_eq!(kept.len(), 1);
/// ```
pub fn evaluate_filter<'a, I>(elements: I, predicate: &Predicate) -> Vec<&'a Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let kept: Vec<&'a Value> = elements
        .into_iter()
        .filter(|element| predicate.matches(element))
        .collect();
    debug!("filter {} kept {} element(s)", predicate, kept.len());
    kept
}

/// Applies a filter to the result of a path query.
///
/// A wildcard result or a single array is filtered element by element. A
/// single object is kept whole when it matches itself. Returns `None` when
/// nothing is left to show.
pub fn filter_selection<'a>(
    selection: &Selection<'a>,
    predicate: &Predicate,
) -> Option<Selection<'a>> {
    match selection {
        Selection::Many(values) => Some(Selection::Many(evaluate_filter(
            values.iter().copied(),
            predicate,
        ))),
        Selection::Single(value) => {
            let value: &'a Value = *value;
            match value {
                Value::Array(items) => Some(Selection::Many(evaluate_filter(items, predicate))),
                Value::Object(_) if predicate.matches(value) => Some(Selection::Single(value)),
                _ => None,
            }
        }
    }
}

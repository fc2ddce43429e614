//! Parsed form of a filter expression.

use crate::document::node::Value;
use crate::error::QueryError;
use regex::Regex;
use std::fmt;

/// Comparison operator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    /// Unanchored regular expression search (`~`)
    RegexMatch,
}

impl Operator {
    /// Every operator, longest symbols first.
    pub const ALL: [Operator; 7] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Ge,
        Operator::Le,
        Operator::Gt,
        Operator::Lt,
        Operator::RegexMatch,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::RegexMatch => "~",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Whether this operator compares numbers only.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A parsed `field OP literal` expression.
///
/// The literal is always a scalar. For `~` it is the pattern text, compiled
/// once when the predicate is built.
#[derive(Debug, Clone)]
pub struct Predicate {
    pub field: String,
    pub operator: Operator,
    pub literal: Value,
    pattern: Option<Regex>,
}

impl Predicate {
    /// Builds a predicate, compiling the pattern for `~`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::FilterSyntax`] if `literal` is an array or
    /// object, and [`QueryError::InvalidPattern`] if a `~` pattern does not
    /// compile.
    pub fn new(
        field: impl Into<String>,
        operator: Operator,
        literal: Value,
    ) -> Result<Self, QueryError> {
        if !literal.is_scalar() {
            return Err(QueryError::filter_syntax(format!(
                "filter value must be a scalar, not {}",
                literal.type_name()
            )));
        }

        let pattern = match (&operator, &literal) {
            (Operator::RegexMatch, Value::String(text)) => Some(
                Regex::new(text).map_err(|err| QueryError::invalid_pattern(text, &err))?,
            ),
            (Operator::RegexMatch, other) => {
                let text = other.to_string();
                Some(Regex::new(&text).map_err(|err| QueryError::invalid_pattern(&text, &err))?)
            }
            _ => None,
        };

        Ok(Predicate {
            field: field.into(),
            operator,
            literal,
            pattern,
        })
    }

    /// The compiled pattern of a `~` predicate.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.operator == other.operator && self.literal == other.literal
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Value::String(s) => write!(f, "{} {} \"{}\"", self.field, self.operator, s),
            other => write!(f, "{} {} {}", self.field, self.operator, other),
        }
    }
}

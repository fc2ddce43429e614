//! Typing of bare scalar text.
//!
//! YAML scalars and filter literals go through the same rules so a value
//! written in a document and the same text written in a filter always compare
//! equal.

use super::node::{Number, Value};

/// Converts scalar text into a typed value.
///
/// - `"..."` or `'...'` → string with the quotes removed
/// - `true` / `false` (any case) → boolean
/// - `null` / `none` (any case) → null
/// - integer or decimal literal → number
/// - anything else → the text as a string
pub fn classify_scalar(text: &str) -> Value {
    let text = text.trim();

    if let Some(unquoted) = unquote(text) {
        return Value::String(unquoted);
    }

    match text.to_ascii_lowercase().as_str() {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        "null" | "none" => return Value::Null,
        _ => {}
    }

    match parse_number(text) {
        Some(number) => Value::Number(number),
        None => Value::String(text.to_string()),
    }
}

/// Strips matching surrounding quotes, resolving escapes.
///
/// Returns `None` when `text` is not a complete quoted string.
pub(crate) fn unquote(text: &str) -> Option<String> {
    let quote = text.chars().next()?;
    if (quote != '"' && quote != '\'') || text.len() < 2 || !text.ends_with(quote) {
        return None;
    }
    let inner = &text[1..text.len() - 1];

    if quote == '\'' {
        // Single-quoted: the only escape is a doubled quote
        return Some(inner.replace("''", "'"));
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Some(out)
}

/// Parses decimal integer and float literals.
///
/// Rejects the spellings `f64::from_str` accepts that are not numbers in a
/// document (`inf`, `NaN`, ...).
fn parse_number(text: &str) -> Option<Number> {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if !digits
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+'))
    {
        return None;
    }

    if digits.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(i) = text.parse::<i64>() {
            return Some(Number::Integer(i));
        }
    }
    text.parse::<f64>().ok().map(Number::Float)
}

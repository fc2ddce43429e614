//! JSON decoding into the shared [`Value`] model.

use super::node::Value;
use crate::error::DecodeError;
use log::debug;

/// Decodes JSON text.
///
/// Object keys keep their order of appearance. Errors carry the line and
/// column reported by `serde_json`.
///
/// # Example
///
/// ```
/// use jsonquery::document::json::decode_json;
///
/// let value = decode_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
/// assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("Alice"));
/// ```
pub fn decode_json(text: &str) -> Result<Value, DecodeError> {
    let parsed: serde_json::Value = serde_json::from_str(text)?;
    debug!("decoded JSON document ({} bytes)", text.len());
    Ok(Value::from(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Number;

    #[test]
    fn test_decode_nested() {
        let value = decode_json(r#"{"users": [{"name": "John", "age": 30}]}"#).unwrap();
        let first = value.get("users").and_then(|u| u.get_index(0)).unwrap();
        assert_eq!(first.get("age"), Some(&Value::Number(Number::Integer(30))));
    }

    #[test]
    fn test_decode_scalar_root() {
        assert_eq!(decode_json("\"hi\"").unwrap(), Value::from("hi"));
    }

    #[test]
    fn test_invalid_json_reports_position() {
        let err = decode_json("{\n  \"a\": 1,\n  oops\n}").unwrap_err();
        assert_eq!(err.line(), 3);
    }
}

//! Rendering of query results.
//!
//! # Formats
//!
//! - `json` - JSON, indented by two spaces unless compact output is asked for
//! - `csv` - one row per object of a list of objects, header from the first
//! - `keys` - the keys of an object (or of the first object in a list)
//! - `values` - one value per line
//! - `plain` - scalars as bare text, containers as indented JSON

use crate::document::node::Value;
use serde::{Deserialize, Serialize};

/// Output format selected on the command line or in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Keys,
    Values,
    Plain,
}

/// Renders `value` in the given format.
///
/// # Example
///
/// ```
/// use jsonquery::document::decode_json;
/// use jsonquery::output::{format_output, OutputFormat};
///
/// let value = decode_json(r#"{"a": 1, "b": [true, null]}"#).unwrap();
/// assert_eq!(format_output(&value, OutputFormat::Json, false), r#"{"a":1,"b":[true,null]}"#);
/// assert_eq!(format_output(&value, OutputFormat::Keys, true), "a\nb");
/// ```
pub fn format_output(value: &Value, format: OutputFormat, pretty: bool) -> String {
    match format {
        OutputFormat::Json => to_json(value, pretty),
        OutputFormat::Csv => to_csv(value).unwrap_or_else(|| value.to_json_string()),
        OutputFormat::Keys => to_keys(value),
        OutputFormat::Values => to_values(value),
        OutputFormat::Plain => match value {
            Value::Array(_) | Value::Object(_) => value.to_json_string_pretty(),
            scalar => scalar.to_string(),
        },
    }
}

fn to_json(value: &Value, pretty: bool) -> String {
    if pretty {
        value.to_json_string_pretty()
    } else {
        value.to_json_string()
    }
}

/// Only a non-empty list whose first element is an object has a table shape.
fn to_csv(value: &Value) -> Option<String> {
    let Value::Array(rows) = value else {
        return None;
    };
    let Some(Value::Object(first)) = rows.first() else {
        return None;
    };

    let headers: Vec<&String> = first.keys().collect();
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| csv_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| match row.get(h) {
                Some(cell) => csv_field(&cell.to_string()),
                None => String::new(),
            })
            .collect();
        lines.push(cells.join(","));
    }

    Some(lines.join("\n"))
}

fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

fn to_keys(value: &Value) -> String {
    let entries = match value {
        Value::Object(entries) => Some(entries),
        Value::Array(items) => match items.first() {
            Some(Value::Object(entries)) => Some(entries),
            _ => None,
        },
        _ => None,
    };

    match entries {
        Some(entries) => entries
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        None => "Not a dictionary".to_string(),
    }
}

fn to_values(value: &Value) -> String {
    match value {
        Value::Object(entries) => entries
            .values()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Array(items) => items
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        scalar => scalar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::json::decode_json;

    fn doc(json: &str) -> Value {
        decode_json(json).unwrap()
    }

    #[test]
    fn test_json_pretty_and_compact() {
        let value = doc(r#"{"a":[1,2]}"#);
        assert_eq!(format_output(&value, OutputFormat::Json, false), r#"{"a":[1,2]}"#);
        assert_eq!(
            format_output(&value, OutputFormat::Json, true),
            "{\n  \"a\": [\n    1,\n    2\n  ]\n}"
        );
    }

    #[test]
    fn test_csv_from_list_of_objects() {
        let value = doc(r#"[{"name":"John","age":30},{"name":"Smith, J","city":"X"}]"#);
        assert_eq!(
            format_output(&value, OutputFormat::Csv, true),
            "name,age\nJohn,30\n\"Smith, J\","
        );
    }

    #[test]
    fn test_csv_falls_back_to_json() {
        let value = doc("[1,2,3]");
        assert_eq!(format_output(&value, OutputFormat::Csv, true), "[1,2,3]");
    }

    #[test]
    fn test_keys() {
        assert_eq!(
            format_output(&doc(r#"[{"id":1,"tag":"x"}]"#), OutputFormat::Keys, true),
            "id\ntag"
        );
        assert_eq!(
            format_output(&doc("42"), OutputFormat::Keys, true),
            "Not a dictionary"
        );
    }

    #[test]
    fn test_values() {
        assert_eq!(
            format_output(&doc(r#"{"a":"x","b":2,"c":null}"#), OutputFormat::Values, true),
            "x\n2\nnull"
        );
        assert_eq!(
            format_output(&doc(r#"["John",[1]]"#), OutputFormat::Values, true),
            "John\n[1]"
        );
    }

    #[test]
    fn test_plain() {
        assert_eq!(format_output(&doc("\"hi\""), OutputFormat::Plain, true), "hi");
        assert_eq!(
            format_output(&doc("[1]"), OutputFormat::Plain, false),
            "[\n  1\n]"
        );
    }
}

//! Integration tests for loading documents from disk.

use flate2::write::GzEncoder;
use flate2::Compression;
use jsonquery::document::Value;
use jsonquery::file::loader::{load_document, load_file, Format};
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

#[test]
fn test_load_simple_json_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, r#"{{"name": "test"}}"#).unwrap();

    let doc = load_file(temp_file.path(), Format::Json).unwrap();

    match &doc {
        Value::Object(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries.get("name"), Some(&Value::from("test")));
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_yaml_detected_from_extension() {
    let mut temp_file = Builder::new().suffix(".yml").tempfile().unwrap();
    write!(temp_file, "server:\n  port: 8080\n").unwrap();

    let doc = load_document(temp_file.path().to_str().unwrap(), false).unwrap();
    let port = doc.get("server").and_then(|s| s.get("port"));
    assert_eq!(port, Some(&Value::from(8080)));
}

#[test]
fn test_yaml_forced_for_other_extension() {
    let mut temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
    write!(temp_file, "a: 1\n").unwrap();

    assert!(load_document(temp_file.path().to_str().unwrap(), false).is_err());
    let doc = load_document(temp_file.path().to_str().unwrap(), true).unwrap();
    assert_eq!(doc.get("a"), Some(&Value::from(1)));
}

#[test]
fn test_load_gzipped_yaml() {
    let mut temp_file = Builder::new().suffix(".yaml.gz").tempfile().unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"- 1\n- 2\n").unwrap();
    temp_file.write_all(&encoder.finish().unwrap()).unwrap();

    let doc = load_document(temp_file.path().to_str().unwrap(), false).unwrap();
    assert_eq!(doc, Value::Array(vec![Value::from(1), Value::from(2)]));
}

#[test]
fn test_missing_file_fails() {
    let err = load_document("/nonexistent/data.json", false).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn test_invalid_json_fails_with_context() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{{\"a\": }}").unwrap();

    let err = load_file(temp_file.path(), Format::Json).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse JSON"));
}

//! Document loading.
//!
//! Picks the decoder from the file name (`.yaml` / `.yml`, ignoring a
//! trailing `.gz`) unless YAML is forced, and decodes the text into a
//! [`Value`].

use crate::document::{decode_json, decode_yaml, Value};
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Source format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

/// Loads a document from `source`, where `-` means stdin.
///
/// # Errors
///
/// This function will return an error if:
/// - The file or stdin cannot be read
/// - Gzip-compressed input is corrupted
/// - The contents are not valid UTF-8, JSON or YAML
pub fn load_document(source: &str, force_yaml: bool) -> Result<Value> {
    if source == "-" {
        let format = if force_yaml { Format::Yaml } else { Format::Json };
        load_from_stdin(format)
    } else {
        let path = Path::new(source);
        let format = if force_yaml {
            Format::Yaml
        } else {
            determine_format(path)
        };
        load_file(path, format)
    }
}

/// Loads and decodes a file from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use jsonquery::file::loader::{load_file, Format};
///
/// let doc = load_file("config.yaml", Format::Yaml).unwrap();
/// ```
pub fn load_file<P: AsRef<Path>>(path: P, format: Format) -> Result<Value> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    debug!("loaded {} ({} bytes)", path_ref.display(), content.len());
    decode(&content, format)
}

/// Loads and decodes everything on standard input.
///
/// Input starting with the gzip magic bytes (`0x1f 0x8b`) is decompressed
/// first.
pub fn load_from_stdin(format: Format) -> Result<Value> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = decode_bytes(buffer)?;
    debug!("loaded stdin ({} bytes)", content.len());
    decode(&content, format)
}

/// Decodes text in the given format.
pub fn decode(content: &str, format: Format) -> Result<Value> {
    match format {
        Format::Json => decode_json(content).context("Failed to parse JSON"),
        Format::Yaml => decode_yaml(content).context("Failed to parse YAML"),
    }
}

/// Determines the format from the file name.
///
/// Examples:
/// - `config.yaml` → YAML
/// - `config.yml.gz` → YAML
/// - `data.json.gz` → JSON
/// - anything else → JSON
pub fn determine_format<P: AsRef<Path>>(path: P) -> Format {
    let path_str = path.as_ref().to_string_lossy();
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

    if base.ends_with(".yaml") || base.ends_with(".yml") {
        Format::Yaml
    } else {
        Format::Json
    }
}

/// Converts raw input bytes to text, gunzipping when the gzip magic bytes are
/// present.
fn decode_bytes(bytes: Vec<u8>) -> Result<String> {
    if bytes.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&bytes)
    } else {
        String::from_utf8(bytes).context("Invalid UTF-8 in input")
    }
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_determine_format() {
        assert_eq!(determine_format("a.yaml"), Format::Yaml);
        assert_eq!(determine_format("a.yml"), Format::Yaml);
        assert_eq!(determine_format("a.yml.gz"), Format::Yaml);
        assert_eq!(determine_format("a.json.gz"), Format::Json);
        assert_eq!(determine_format("data"), Format::Json);
    }

    #[test]
    fn test_decode_bytes_plain_and_gzipped() {
        assert_eq!(decode_bytes(b"{}".to_vec()).unwrap(), "{}");
        assert_eq!(decode_bytes(gzip("a: 1")).unwrap(), "a: 1");
    }

    #[test]
    fn test_decode_bytes_rejects_invalid_utf8() {
        assert!(decode_bytes(vec![0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn test_decode_error_keeps_cause() {
        let err = decode("a:\n\tb: 1", Format::Yaml).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("Failed to parse YAML"));
        assert!(chain.contains("line 2"));
    }
}

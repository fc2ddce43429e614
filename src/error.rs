//! Error types for decoding, path queries and filters.
//!
//! All of these describe malformed input rather than transient conditions, so
//! none of them are worth retrying.

use thiserror::Error;

/// A document could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The JSON text is not valid JSON.
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },
    /// The YAML text uses indentation or syntax outside the supported subset.
    #[error("Invalid YAML at line {line}: {message}")]
    Yaml { line: usize, message: String },
}

impl DecodeError {
    /// Builds a YAML error for the given 1-based line.
    pub(crate) fn yaml(line: usize, message: impl Into<String>) -> Self {
        DecodeError::Yaml {
            line,
            message: message.into(),
        }
    }

    /// Returns the 1-based line the error points at.
    pub fn line(&self) -> usize {
        match self {
            DecodeError::Json { line, .. } | DecodeError::Yaml { line, .. } => *line,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        let line = err.line();
        let column = err.column();
        let message = err.to_string();
        // serde_json appends " at line X column Y" to its own message
        let message = match message.rfind(" at line ") {
            Some(idx) => message[..idx].to_string(),
            None => message,
        };
        DecodeError::Json {
            line,
            column,
            message,
        }
    }
}

/// Errors returned by the query engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The input document could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The path string is malformed.
    #[error("Invalid path segment '{segment}': {message}")]
    PathSyntax { segment: String, message: String },

    /// A strict lookup missed.
    ///
    /// `prefix` is the part of the path consumed successfully, rendered the
    /// way it would be written (empty when the miss happened at the root).
    #[error("{}", not_found_message(.prefix, .segment))]
    PathNotFound { prefix: String, segment: String },

    /// The filter expression is malformed.
    #[error("Invalid filter expression: {message}")]
    FilterSyntax { message: String },

    /// A regular expression failed to compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl QueryError {
    pub(crate) fn path_syntax(segment: impl Into<String>, message: impl Into<String>) -> Self {
        QueryError::PathSyntax {
            segment: segment.into(),
            message: message.into(),
        }
    }

    pub(crate) fn filter_syntax(message: impl Into<String>) -> Self {
        QueryError::FilterSyntax {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_pattern(pattern: &str, err: &regex::Error) -> Self {
        QueryError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}

fn not_found_message(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        format!("Path not found: '{}' does not exist at the document root", segment)
    } else {
        format!("Path not found: '{}' does not exist under '{}'", segment, prefix)
    }
}

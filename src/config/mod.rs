//! Configuration system for jsonquery.
//!
//! Settings are read from `~/.config/jsonquery/config.toml` when present.
//! Command-line flags override whatever the file says.
//!
//! # Example
//!
//! ```
//! use jsonquery::config::Config;
//! use jsonquery::output::OutputFormat;
//!
//! let config = Config::default();
//! assert_eq!(config.format, OutputFormat::Json);
//! assert!(config.pretty);
//!
//! let custom: Config = toml::from_str("format = \"csv\"").unwrap();
//! assert_eq!(custom.format, OutputFormat::Csv);
//! assert!(custom.pretty);
//! ```

use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};

/// Configuration for the jsonquery command.
///
/// # Fields
///
/// * `format` - Output format when `--format` is not given (default: json)
/// * `pretty` - Indent JSON output (default: true)
/// * `case_sensitive_search` - Make `--search` case-sensitive (default: false)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output format when none is given on the command line
    #[serde(default)]
    pub format: OutputFormat,

    /// Indent JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Case-sensitive `--search`
    #[serde(default)]
    pub case_sensitive_search: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
            case_sensitive_search: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/jsonquery/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("jsonquery");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("ignoring invalid config {}: {}", path.display(), err);
                Self::default()
            }),
            Err(err) => {
                log::warn!("cannot read config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}

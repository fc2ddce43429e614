//! Reading documents from disk or stdin.
//!
//! This module loads raw text (transparently gunzipping `.gz` files and
//! gzip-compressed stdin) and decodes it as JSON or YAML.

pub mod loader;

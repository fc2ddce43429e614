//! Document model and decoders.
//!
//! JSON and YAML input both decode into the same [`Value`] tree, which is
//! what path queries and filters operate on.

pub mod json;
pub mod node;
pub mod scalar;
pub mod yaml;

pub use json::decode_json;
pub use node::{Number, Value};
pub use scalar::classify_scalar;
pub use yaml::decode_yaml;

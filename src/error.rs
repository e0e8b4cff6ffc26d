//! Error types for taxonomy loading and scoring configuration.

use std::io;
use std::path::PathBuf;

/// Errors surfaced to callers of the scoring core.
///
/// Lookups that miss (unknown language names, disjoint paths, malformed word
/// lists) are not errors: they resolve to zero scores and partial trees.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("taxonomy root must be a JSON object, found {found}")]
    NotAMapping { found: &'static str },

    #[error("invalid taxonomy JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid scoring config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

//! Errors raised while acquiring a document or schema.
//!
//! Rule violations are not errors in this sense; see [`crate::Violation`].

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read, parse, or shape-check an input.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin} is not valid JSON: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin} must be a JSON object, found {found}")]
    NotAnObject { origin: String, found: &'static str },

    #[error("{origin} is malformed: {source}")]
    SchemaShape {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Attach a file path as the error origin, replacing the generic label
    /// used when parsing from a string.
    pub(crate) fn with_origin(self, origin: String) -> Self {
        match self {
            LoadError::Io { .. } => self,
            LoadError::Json { source, .. } => LoadError::Json { origin, source },
            LoadError::NotAnObject { found, .. } => LoadError::NotAnObject { origin, found },
            LoadError::SchemaShape { source, .. } => LoadError::SchemaShape { origin, source },
        }
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

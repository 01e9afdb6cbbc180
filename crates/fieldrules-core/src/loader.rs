//! Reading documents and schemas from disk, and the file-level entry point.
//!
//! [`validate_files`] never fails: unreadable inputs and rule violations both
//! come back as a failed [`Outcome`], each with a printable message.

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::ValidateOptions;
use crate::error::{json_type_name, LoadError};
use crate::schema::RuleSchema;
use crate::validator::{validate_with_options, ValidationResult};

/// A JSON object under validation.
pub type Document = serde_json::Map<String, Value>;

/// Parse document text. The top level must be a JSON object.
pub fn parse_document(text: &str) -> Result<Document, LoadError> {
    let value: Value = serde_json::from_str(text).map_err(|source| LoadError::Json {
        origin: "document".to_string(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(LoadError::NotAnObject {
            origin: "document".to_string(),
            found: json_type_name(&other),
        }),
    }
}

pub fn load_document(path: impl AsRef<Path>) -> Result<Document, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded document file");
    parse_document(&text).map_err(|e| e.with_origin(format!("document {}", path.display())))
}

/// Result of validating a document file against a schema file.
#[derive(Debug)]
pub enum Outcome {
    /// Every applicable rule holds.
    Passed,
    /// Both inputs loaded, but at least one rule is violated.
    Invalid(ValidationResult),
    /// An input could not be read, parsed, or shape-checked.
    Unreadable(LoadError),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    /// `Validation failed: ...` text for a failed outcome, one line per
    /// reported violation.
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Passed => None,
            Outcome::Invalid(result) => {
                let lines: Vec<String> = result
                    .violations()
                    .iter()
                    .map(|violation| format!("Validation failed: {violation}"))
                    .collect();
                Some(lines.join("\n"))
            }
            Outcome::Unreadable(err) => Some(format!("Validation failed: {err}")),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => f.write_str(&message),
            None => f.write_str("Valid"),
        }
    }
}

impl From<ValidationResult> for Outcome {
    fn from(result: ValidationResult) -> Self {
        if result.is_valid() {
            Outcome::Passed
        } else {
            Outcome::Invalid(result)
        }
    }
}

/// Load a document and a schema from disk and validate one against the other.
pub fn validate_files(
    document_path: impl AsRef<Path>,
    schema_path: impl AsRef<Path>,
    options: &ValidateOptions,
) -> Outcome {
    let loaded = load_document(document_path)
        .and_then(|document| Ok((document, RuleSchema::from_path(schema_path)?)));

    let outcome = match loaded {
        Ok((document, schema)) => validate_with_options(&document, &schema, options).into(),
        Err(err) => Outcome::Unreadable(err),
    };

    if let Some(message) = outcome.message() {
        tracing::info!("{message}");
    }
    outcome
}

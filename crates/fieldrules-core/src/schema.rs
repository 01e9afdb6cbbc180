//! The rule schema model.
//!
//! A schema is a JSON object with up to five recognized keys. Its shape is
//! checked once, when it is loaded; rule checks then read typed fields.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{json_type_name, LoadError};
use crate::rules::RuleKind;

/// Two field names that may not both appear in a document.
///
/// Either name may be absent, in which case the pair can never be violated.
/// Only a JSON object with `field1`/`field2` keys is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Map<String, Value>")]
pub struct FieldPair {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field2: Option<String>,
}

impl FieldPair {
    pub fn new(field1: impl Into<String>, field2: impl Into<String>) -> Self {
        Self {
            field1: Some(field1.into()),
            field2: Some(field2.into()),
        }
    }
}

impl TryFrom<serde_json::Map<String, Value>> for FieldPair {
    type Error = String;

    fn try_from(map: serde_json::Map<String, Value>) -> Result<Self, Self::Error> {
        let mut pair = FieldPair::default();
        for (key, value) in map {
            let slot = match key.as_str() {
                "field1" => &mut pair.field1,
                "field2" => &mut pair.field2,
                other => {
                    return Err(format!(
                        "unknown field `{other}`, expected `field1` or `field2`"
                    ))
                }
            };
            *slot = match value {
                Value::String(name) => Some(name),
                Value::Null => None,
                other => {
                    return Err(format!(
                        "`{key}` must be a string, found {}",
                        json_type_name(&other)
                    ))
                }
            };
        }
        Ok(pair)
    }
}

/// A parsed rule schema. Every rule is optional; an absent rule always passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSchema {
    /// Fields that must all be present.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_fields: Vec<String>,

    /// Fields of which at least one must be present. Empty means no constraint.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub at_least_one_of: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub either_one_or_another: Option<FieldPair>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutually_exclusive_fields: Option<FieldPair>,

    /// Allowed values per field, in schema order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub field_values: IndexMap<String, Vec<Value>>,
}

impl RuleSchema {
    /// Build a schema from an already-parsed JSON value.
    ///
    /// The value must be an object. Unknown top-level keys are ignored with a
    /// warning; recognized keys with the wrong shape are an error.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let Value::Object(map) = &value else {
            return Err(LoadError::NotAnObject {
                origin: "schema".to_string(),
                found: json_type_name(&value),
            });
        };

        for key in map.keys() {
            if RuleKind::from_key(key).is_none() {
                tracing::warn!(key = %key, "ignoring unrecognized schema key");
            }
        }

        serde_json::from_value(value).map_err(|source| LoadError::SchemaShape {
            origin: "schema".to_string(),
            source,
        })
    }

    /// Parse a schema from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(text).map_err(|source| LoadError::Json {
            origin: "schema".to_string(),
            source,
        })?;
        Self::from_value(value)
    }

    /// Read and parse a schema file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded schema file");
        Self::from_json_str(&text)
            .map_err(|e| e.with_origin(format!("schema {}", path.display())))
    }

    /// Whether the rule of the given kind constrains anything.
    pub fn defines(&self, kind: RuleKind) -> bool {
        match kind {
            RuleKind::RequiredFields => !self.required_fields.is_empty(),
            RuleKind::AtLeastOneOf => !self.at_least_one_of.is_empty(),
            RuleKind::EitherOneOrAnother => self.either_one_or_another.is_some(),
            RuleKind::MutuallyExclusiveFields => self.mutually_exclusive_fields.is_some(),
            RuleKind::FieldValues => !self.field_values.is_empty(),
        }
    }

    /// Rules this schema defines, in evaluation order.
    pub fn defined_rules(&self) -> Vec<RuleKind> {
        RuleKind::ALL
            .into_iter()
            .filter(|kind| self.defines(*kind))
            .collect()
    }
}

//! Rule kinds and the violations they report.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The five rule kinds, each keyed by its schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    RequiredFields,
    AtLeastOneOf,
    EitherOneOrAnother,
    MutuallyExclusiveFields,
    FieldValues,
}

impl RuleKind {
    /// All rule kinds in evaluation order.
    pub const ALL: [RuleKind; 5] = [
        RuleKind::RequiredFields,
        RuleKind::AtLeastOneOf,
        RuleKind::EitherOneOrAnother,
        RuleKind::MutuallyExclusiveFields,
        RuleKind::FieldValues,
    ];

    /// The schema key this rule is read from.
    pub fn key(self) -> &'static str {
        match self {
            RuleKind::RequiredFields => "required_fields",
            RuleKind::AtLeastOneOf => "at_least_one_of",
            RuleKind::EitherOneOrAnother => "either_one_or_another",
            RuleKind::MutuallyExclusiveFields => "mutually_exclusive_fields",
            RuleKind::FieldValues => "field_values",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single rule failure against a document.
///
/// The `Display` text is the human-readable report for the failure.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    #[error("Required field '{field}' is missing in the JSON data.")]
    RequiredFields { field: String },

    #[error("At least one of {} must be present in the JSON data.", render_names(.fields))]
    AtLeastOneOf { fields: Vec<String> },

    #[error("Either '{field1}' or '{field2}' should be present, not both.")]
    EitherOneOrAnother { field1: String, field2: String },

    #[error("'{field1}' and '{field2}' are mutually exclusive, but both are present.")]
    MutuallyExclusiveFields { field1: String, field2: String },

    #[error(
        "Invalid value '{}' for field '{field}'. Allowed values are {}.",
        render_value(.value),
        render_values(.allowed)
    )]
    FieldValues {
        field: String,
        value: Value,
        allowed: Vec<Value>,
    },
}

impl Violation {
    /// The rule that produced this violation.
    pub fn kind(&self) -> RuleKind {
        match self {
            Violation::RequiredFields { .. } => RuleKind::RequiredFields,
            Violation::AtLeastOneOf { .. } => RuleKind::AtLeastOneOf,
            Violation::EitherOneOrAnother { .. } => RuleKind::EitherOneOrAnother,
            Violation::MutuallyExclusiveFields { .. } => RuleKind::MutuallyExclusiveFields,
            Violation::FieldValues { .. } => RuleKind::FieldValues,
        }
    }

    /// Field names the violation refers to.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Violation::RequiredFields { field } | Violation::FieldValues { field, .. } => {
                vec![field.as_str()]
            }
            Violation::AtLeastOneOf { fields } => fields.iter().map(String::as_str).collect(),
            Violation::EitherOneOrAnother { field1, field2 }
            | Violation::MutuallyExclusiveFields { field1, field2 } => {
                vec![field1.as_str(), field2.as_str()]
            }
        }
    }
}

/// Strings render bare, everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_values(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(Value::to_string).collect();
    format!("[{}]", items.join(","))
}

fn render_names(names: &[String]) -> String {
    let items: Vec<String> = names
        .iter()
        .map(|name| Value::from(name.as_str()).to_string())
        .collect();
    format!("[{}]", items.join(","))
}

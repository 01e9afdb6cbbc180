//! The rule evaluator.
//!
//! Rules run in a fixed order: required fields, at-least-one-of,
//! either-one-or-another, mutually exclusive fields, field values. In
//! [`Mode::FirstFailure`] the evaluator stops at the first violation and
//! later rules are never consulted.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::checks;
use crate::config::{Mode, ValidateOptions};
use crate::loader::Document;
use crate::rules::{RuleKind, Violation};
use crate::schema::RuleSchema;

/// Outcome of evaluating a schema against a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations in evaluation order. At most one in first-failure mode.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Message of the first violation, if any.
    pub fn message(&self) -> Option<String> {
        self.first().map(ToString::to_string)
    }

    pub fn into_result(self) -> Result<(), Vec<Violation>> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self.violations)
        }
    }
}

/// Serializes as `{ "valid": bool, "violations": [{ "rule", "message", ... }] }`.
impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Entry<'a> {
            message: String,
            #[serde(flatten)]
            violation: &'a Violation,
        }

        let entries: Vec<Entry<'_>> = self
            .violations
            .iter()
            .map(|violation| Entry {
                message: violation.to_string(),
                violation,
            })
            .collect();

        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("violations", &entries)?;
        state.end()
    }
}

/// Validate a document with default options (stop at first violation).
pub fn validate(document: &Document, schema: &RuleSchema) -> ValidationResult {
    validate_with_options(document, schema, &ValidateOptions::default())
}

pub fn validate_with_options(
    document: &Document,
    schema: &RuleSchema,
    options: &ValidateOptions,
) -> ValidationResult {
    let mut violations = Vec::new();

    for kind in RuleKind::ALL {
        let found = evaluate_rule(kind, document, schema);
        tracing::debug!(rule = %kind, violations = found.len(), "evaluated rule");

        if found.is_empty() {
            continue;
        }
        for violation in &found {
            tracing::debug!(rule = %kind, %violation, "rule violated");
        }

        match options.mode {
            Mode::FirstFailure => {
                violations.extend(found.into_iter().take(1));
                break;
            }
            Mode::CollectAll => violations.extend(found),
        }
    }

    debug_assert!(!options.stops_at_first() || violations.len() <= 1);
    ValidationResult { violations }
}

fn evaluate_rule(kind: RuleKind, document: &Document, schema: &RuleSchema) -> Vec<Violation> {
    match kind {
        RuleKind::RequiredFields => checks::check_required_fields(document, &schema.required_fields),
        RuleKind::AtLeastOneOf => checks::check_at_least_one_of(document, &schema.at_least_one_of)
            .into_iter()
            .collect(),
        RuleKind::EitherOneOrAnother => schema
            .either_one_or_another
            .as_ref()
            .and_then(|pair| checks::check_either_one_or_another(document, pair))
            .into_iter()
            .collect(),
        RuleKind::MutuallyExclusiveFields => schema
            .mutually_exclusive_fields
            .as_ref()
            .and_then(|pair| checks::check_mutually_exclusive_fields(document, pair))
            .into_iter()
            .collect(),
        RuleKind::FieldValues => checks::check_field_values(document, &schema.field_values),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn schema(value: Value) -> RuleSchema {
        RuleSchema::from_value(value).unwrap()
    }

    fn run(document: Value, rules: Value) -> ValidationResult {
        validate(&doc(document), &schema(rules))
    }

    // -----------------------------------------------------------------------
    // Individual rules
    // -----------------------------------------------------------------------

    #[test]
    fn test_empty_schema_accepts_anything() {
        assert!(run(json!({}), json!({})).is_valid());
        assert!(run(json!({ "a": [1, { "b": null }] }), json!({})).is_valid());
    }

    #[test]
    fn test_required_field_missing() {
        let result = run(json!({}), json!({ "required_fields": ["a"] }));
        assert!(!result.is_valid());
        assert_eq!(
            result.message().unwrap(),
            "Required field 'a' is missing in the JSON data."
        );
    }

    #[test]
    fn test_at_least_one_of() {
        let rules = json!({ "at_least_one_of": ["x", "y"] });
        assert!(run(json!({ "x": 1 }), rules.clone()).is_valid());
        assert_eq!(run(json!({}), rules).first().unwrap().kind(), RuleKind::AtLeastOneOf);
    }

    #[test]
    fn test_either_one_or_another_is_not_xor() {
        let rules = json!({ "either_one_or_another": { "field1": "a", "field2": "b" } });
        assert!(!run(json!({ "a": 1, "b": 2 }), rules.clone()).is_valid());
        assert!(run(json!({ "a": 1 }), rules.clone()).is_valid());
        assert!(run(json!({}), rules).is_valid());
    }

    #[test]
    fn test_mutually_exclusive() {
        let rules = json!({ "mutually_exclusive_fields": { "field1": "a", "field2": "b" } });
        let result = run(json!({ "a": 1, "b": 1 }), rules.clone());
        assert_eq!(
            result.message().unwrap(),
            "'a' and 'b' are mutually exclusive, but both are present."
        );
        assert!(run(json!({ "a": 1 }), rules).is_valid());
    }

    #[test]
    fn test_field_values() {
        let rules = json!({ "field_values": { "status": ["open", "closed"] } });
        assert!(run(json!({ "status": "open" }), rules.clone()).is_valid());

        let message = run(json!({ "status": "pending" }), rules).message().unwrap();
        assert!(message.contains("pending"));
        assert!(message.contains(r#"["open","closed"]"#));
    }

    // -----------------------------------------------------------------------
    // Ordering and modes
    // -----------------------------------------------------------------------

    fn everything_fails() -> (Document, RuleSchema) {
        let document = doc(json!({
            "a": 1, "b": 2, "c": 3, "d": 4, "status": "pending", "level": 9
        }));
        let rules = schema(json!({
            "required_fields": ["id", "name"],
            "at_least_one_of": ["email", "phone"],
            "either_one_or_another": { "field1": "a", "field2": "b" },
            "mutually_exclusive_fields": { "field1": "c", "field2": "d" },
            "field_values": { "status": ["open"], "level": [1, 2] }
        }));
        (document, rules)
    }

    #[test]
    fn test_first_failure_reports_earliest_rule_only() {
        let (document, rules) = everything_fails();
        let result = validate(&document, &rules);
        assert_eq!(result.violations().len(), 1);
        assert_eq!(
            result.message().unwrap(),
            "Required field 'id' is missing in the JSON data."
        );
    }

    #[test]
    fn test_rule_order_when_earlier_rules_pass() {
        let (mut document, rules) = everything_fails();
        document.insert("id".into(), json!(1));
        document.insert("name".into(), json!("n"));
        let result = validate(&document, &rules);
        assert_eq!(result.first().unwrap().kind(), RuleKind::AtLeastOneOf);

        document.insert("email".into(), json!("e"));
        document.remove("a");
        document.remove("c");
        let result = validate(&document, &rules);
        assert_eq!(result.first().unwrap().kind(), RuleKind::FieldValues);
        assert_eq!(result.first().unwrap().fields(), vec!["status"]);
    }

    #[test]
    fn test_collect_all_reports_every_violation_in_order() {
        let (document, rules) = everything_fails();
        let result = validate_with_options(&document, &rules, &ValidateOptions::collect_all());

        let kinds: Vec<RuleKind> = result.violations().iter().map(Violation::kind).collect();
        assert_eq!(
            kinds,
            vec![
                RuleKind::RequiredFields,
                RuleKind::RequiredFields,
                RuleKind::AtLeastOneOf,
                RuleKind::EitherOneOrAnother,
                RuleKind::MutuallyExclusiveFields,
                RuleKind::FieldValues,
                RuleKind::FieldValues,
            ]
        );
        assert_eq!(
            result.message().unwrap(),
            "Required field 'id' is missing in the JSON data."
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(run(json!({}), json!({})).into_result(), Ok(()));
        let err = run(json!({}), json!({ "required_fields": ["a"] }))
            .into_result()
            .unwrap_err();
        assert_eq!(err, vec![Violation::RequiredFields { field: "a".into() }]);
    }

    #[test]
    fn test_serialized_result() {
        let result = run(json!({ "status": 3 }), json!({ "field_values": { "status": [1, 2] } }));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "valid": false,
                "violations": [{
                    "message": "Invalid value '3' for field 'status'. Allowed values are [1,2].",
                    "rule": "field_values",
                    "field": "status",
                    "value": 3,
                    "allowed": [1, 2]
                }]
            })
        );

        assert_eq!(
            serde_json::to_value(run(json!({}), json!({}))).unwrap(),
            json!({ "valid": true, "violations": [] })
        );
    }
}

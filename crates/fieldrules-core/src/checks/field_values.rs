//! Field values: a present field must hold one of its allowed values.
//!
//! Membership is plain JSON equality. No coercion is applied, so `1`, `1.0`,
//! `"1"` and `true` are all distinct.

use indexmap::IndexMap;
use serde_json::Value;

use crate::loader::Document;
use crate::rules::Violation;

pub fn check_field_values(
    document: &Document,
    field_values: &IndexMap<String, Vec<Value>>,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (field, allowed) in field_values {
        let Some(value) = document.get(field) else {
            continue;
        };
        if !allowed.contains(value) {
            violations.push(Violation::FieldValues {
                field: field.clone(),
                value: value.clone(),
                allowed: allowed.clone(),
            });
        }
    }
    violations
}

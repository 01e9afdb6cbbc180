//! Required fields: every listed name must be a key of the document.

use crate::loader::Document;
use crate::rules::Violation;

/// Report each listed field the document lacks.
pub fn check_required_fields(document: &Document, fields: &[String]) -> Vec<Violation> {
    fields
        .iter()
        .filter(|field| !document.contains_key(field.as_str()))
        .map(|field| Violation::RequiredFields {
            field: field.clone(),
        })
        .collect()
}

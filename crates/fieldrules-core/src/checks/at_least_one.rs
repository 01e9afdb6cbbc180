//! At-least-one-of: one of the listed names must be a key of the document.

use crate::loader::Document;
use crate::rules::Violation;

/// An empty list places no constraint on the document.
pub fn check_at_least_one_of(document: &Document, fields: &[String]) -> Option<Violation> {
    if fields.is_empty() || fields.iter().any(|field| document.contains_key(field.as_str())) {
        return None;
    }
    Some(Violation::AtLeastOneOf {
        fields: fields.to_vec(),
    })
}

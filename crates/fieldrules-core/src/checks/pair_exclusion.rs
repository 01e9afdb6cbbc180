//! Pairwise exclusion: two named fields must not both be present.
//!
//! `either_one_or_another` and `mutually_exclusive_fields` share this check
//! and differ only in how the violation is reported. Neither rule requires
//! either field to be present.

use crate::loader::Document;
use crate::rules::Violation;
use crate::schema::FieldPair;

/// Both names of the pair, if both are set and both present in the document.
fn both_present<'a>(document: &Document, pair: &'a FieldPair) -> Option<(&'a str, &'a str)> {
    let field1 = pair.field1.as_deref()?;
    let field2 = pair.field2.as_deref()?;
    (document.contains_key(field1) && document.contains_key(field2)).then_some((field1, field2))
}

pub fn check_either_one_or_another(document: &Document, pair: &FieldPair) -> Option<Violation> {
    both_present(document, pair).map(|(field1, field2)| Violation::EitherOneOrAnother {
        field1: field1.to_string(),
        field2: field2.to_string(),
    })
}

pub fn check_mutually_exclusive_fields(document: &Document, pair: &FieldPair) -> Option<Violation> {
    both_present(document, pair).map(|(field1, field2)| Violation::MutuallyExclusiveFields {
        field1: field1.to_string(),
        field2: field2.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_both_present_fails() {
        let document = doc(json!({ "a": 1, "b": 2 }));
        let pair = FieldPair::new("a", "b");

        assert_eq!(
            check_either_one_or_another(&document, &pair).unwrap().to_string(),
            "Either 'a' or 'b' should be present, not both."
        );
        assert_eq!(
            check_mutually_exclusive_fields(&document, &pair).unwrap().to_string(),
            "'a' and 'b' are mutually exclusive, but both are present."
        );
    }

    #[test]
    fn test_one_or_neither_present_passes() {
        let pair = FieldPair::new("a", "b");
        for document in [doc(json!({ "a": 1 })), doc(json!({ "b": 1 })), Document::new()] {
            assert_eq!(check_either_one_or_another(&document, &pair), None);
            assert_eq!(check_mutually_exclusive_fields(&document, &pair), None);
        }
    }

    #[test]
    fn test_unset_member_never_fails() {
        let document = doc(json!({ "a": 1, "b": 2 }));
        let pair = FieldPair {
            field1: Some("a".into()),
            field2: None,
        };
        assert_eq!(check_either_one_or_another(&document, &pair), None);
        assert_eq!(check_mutually_exclusive_fields(&document, &FieldPair::default()), None);
    }

    #[test]
    fn test_same_field_twice() {
        let document = doc(json!({ "a": 1 }));
        let pair = FieldPair::new("a", "a");
        assert!(check_mutually_exclusive_fields(&document, &pair).is_some());
    }
}

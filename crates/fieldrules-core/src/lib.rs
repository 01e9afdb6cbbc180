//! # fieldrules-core
//!
//! Checks a JSON document against a small rule schema and reports whether it
//! passes. Five rule kinds are supported:
//!
//! | Schema key | Rule |
//! |---|---|
//! | `required_fields` | every listed field must be present |
//! | `at_least_one_of` | at least one listed field must be present |
//! | `either_one_or_another` | the two fields must not both be present |
//! | `mutually_exclusive_fields` | the two fields must not both be present |
//! | `field_values` | a present field must hold one of the allowed values |
//!
//! Rules are evaluated in that order. By default evaluation stops at the
//! first violation; [`Mode::CollectAll`] reports every violation instead.
//!
//! ## Example
//!
//! ```rust
//! use fieldrules_core::{parse_document, validate, RuleSchema};
//!
//! let schema = RuleSchema::from_json_str(r#"{ "required_fields": ["id"] }"#).unwrap();
//! let document = parse_document(r#"{ "name": "widget" }"#).unwrap();
//!
//! let result = validate(&document, &schema);
//! assert!(!result.is_valid());
//! assert_eq!(
//!     result.message().unwrap(),
//!     "Required field 'id' is missing in the JSON data."
//! );
//! ```

pub mod checks;
pub mod config;
pub mod error;
pub mod loader;
pub mod rules;
pub mod schema;
pub mod validator;

pub use config::{Mode, ValidateOptions};
pub use error::LoadError;
pub use loader::{load_document, parse_document, validate_files, Document, Outcome};
pub use rules::{RuleKind, Violation};
pub use schema::{FieldPair, RuleSchema};
pub use validator::{validate, validate_with_options, ValidationResult};

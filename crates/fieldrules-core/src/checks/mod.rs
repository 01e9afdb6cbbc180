//! Rule checks.
//!
//! Each check is a read-only function over a document and one rule's
//! configuration, returning every violation of that rule in schema order.
//! The evaluator in [`crate::validator`] sequences them.

pub mod at_least_one;
pub mod field_values;
pub mod pair_exclusion;
pub mod required;

pub use at_least_one::check_at_least_one_of;
pub use field_values::check_field_values;
pub use pair_exclusion::{check_either_one_or_another, check_mutually_exclusive_fields};
pub use required::check_required_fields;

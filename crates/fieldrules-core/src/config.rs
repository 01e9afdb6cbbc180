//! Validation options.

use serde::{Deserialize, Serialize};

/// How many violations an evaluation reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Stop at the first violation, in rule order.
    #[default]
    FirstFailure,
    /// Evaluate every rule and report every violation.
    CollectAll,
}

/// Options controlling a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    pub mode: Mode,
}

impl ValidateOptions {
    /// Options that report every violation.
    pub fn collect_all() -> Self {
        Self {
            mode: Mode::CollectAll,
        }
    }

    pub(crate) fn stops_at_first(&self) -> bool {
        self.mode == Mode::FirstFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_is_first_failure() {
        assert_eq!(ValidateOptions::default().mode, Mode::FirstFailure);
        assert!(ValidateOptions::default().stops_at_first());
        assert!(!ValidateOptions::collect_all().stops_at_first());
    }

    #[test]
    fn test_mode_serde_names() {
        let options: ValidateOptions = serde_json::from_value(json!({ "mode": "collect-all" })).unwrap();
        assert_eq!(options.mode, Mode::CollectAll);

        let empty: ValidateOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, ValidateOptions::default());
    }
}

//! Label/value criteria used to include or exclude structures.

use std::fmt;
use std::str::FromStr;

use super::error::CriterionError;

/// Separator between label and value in a criterion token.
pub const CRITERION_SEPARATOR: &str = "::";

/// A metadata label and value that must both match exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelValueCriterion {
    pub label: String,
    pub value: String,
}

impl LabelValueCriterion {
    /// Creates a criterion from a label and a value.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Returns true if `label` and `value` equal this criterion exactly.
    #[must_use]
    pub fn matches(&self, label: &str, value: &str) -> bool {
        self.label == label && self.value == value
    }
}

/// Parses `Label::Value`. The value is everything after the first `::`.
impl FromStr for LabelValueCriterion {
    type Err = CriterionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let Some((label, value)) = token.split_once(CRITERION_SEPARATOR) else {
            return Err(CriterionError::MissingSeparator {
                token: token.to_string(),
            });
        };
        if label.is_empty() {
            return Err(CriterionError::EmptyLabel {
                token: token.to_string(),
            });
        }
        Ok(Self::new(label, value))
    }
}

impl fmt::Display for LabelValueCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{CRITERION_SEPARATOR}{}", self.label, self.value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_parse_label_and_value() {
        let criterion: LabelValueCriterion = "Strukturtyp::Abbildung".parse().unwrap();
        assert_eq!(criterion, LabelValueCriterion::new("Strukturtyp", "Abbildung"));
    }

    #[test]
    fn test_criterion_parse_value_keeps_later_separators() {
        let criterion: LabelValueCriterion = "Signatur::A::12".parse().unwrap();
        assert_eq!(criterion.label, "Signatur");
        assert_eq!(criterion.value, "A::12");
    }

    #[test]
    fn test_criterion_parse_single_colon_rejected() {
        let err = "Strukturtyp:Abbildung"
            .parse::<LabelValueCriterion>()
            .unwrap_err();
        assert!(matches!(err, CriterionError::MissingSeparator { .. }));
    }

    #[test]
    fn test_criterion_parse_empty_label_rejected() {
        let err = "::Kapitel".parse::<LabelValueCriterion>().unwrap_err();
        assert!(matches!(err, CriterionError::EmptyLabel { .. }));
    }

    #[test]
    fn test_criterion_matches_is_case_sensitive() {
        let criterion = LabelValueCriterion::new("Chapter", "Intro");
        assert!(criterion.matches("Chapter", "Intro"));
        assert!(!criterion.matches("chapter", "Intro"));
        assert!(!criterion.matches("Chapter", "intro"));
    }

    #[test]
    fn test_criterion_display_round_trips_token() {
        let criterion = LabelValueCriterion::new("Chapter", "Intro");
        assert_eq!(criterion.to_string(), "Chapter::Intro");
    }
}

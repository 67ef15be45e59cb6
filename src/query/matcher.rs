//! Matching a single metadata entry against a set of criteria.

use crate::manifest::{LocalizedText, Metadata};

use super::criterion::LabelValueCriterion;

/// Returns true if any criterion equals the entry's label and value.
///
/// Multilingual entries are compared position by position: label `i` pairs
/// with value `i`, and positions with no value are skipped. A scalar paired
/// with a list never matches. Missing label or value never matches.
#[must_use]
pub fn metadata_matches(metadata: &Metadata, criteria: &[LabelValueCriterion]) -> bool {
    let (Some(label), Some(value)) = (&metadata.label, &metadata.value) else {
        return false;
    };
    match (label, value) {
        (LocalizedText::Scalar(label), LocalizedText::Scalar(value)) => {
            any_criterion_matches(criteria, label, value)
        }
        (LocalizedText::List(labels), LocalizedText::List(values)) => labels
            .iter()
            .zip(values)
            .any(|pair| match pair {
                (Some(label), Some(value)) => any_criterion_matches(criteria, label, value),
                _ => false,
            }),
        _ => false,
    }
}

fn any_criterion_matches(criteria: &[LabelValueCriterion], label: &str, value: &str) -> bool {
    criteria.iter().any(|c| c.matches(label, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[Option<&str>]) -> Option<LocalizedText> {
        Some(LocalizedText::List(
            values.iter().map(|v| v.map(str::to_string)).collect(),
        ))
    }

    fn chapter_intro() -> Vec<LabelValueCriterion> {
        vec![LabelValueCriterion::new("Chapter", "Intro")]
    }

    #[test]
    fn test_scalar_metadata_matches_exact_pair() {
        let meta = Metadata::scalar("Chapter", "Intro");
        assert!(metadata_matches(&meta, &chapter_intro()));
    }

    #[test]
    fn test_scalar_metadata_rejects_other_value() {
        let meta = Metadata::scalar("Chapter", "Outro");
        assert!(!metadata_matches(&meta, &chapter_intro()));
    }

    #[test]
    fn test_empty_criteria_never_match() {
        let meta = Metadata::scalar("Chapter", "Intro");
        assert!(!metadata_matches(&meta, &[]));
    }

    #[test]
    fn test_missing_label_or_value_never_matches() {
        let no_value = Metadata {
            label: Some("Chapter".into()),
            value: None,
        };
        let no_label = Metadata {
            label: None,
            value: Some("Intro".into()),
        };
        assert!(!metadata_matches(&no_value, &chapter_intro()));
        assert!(!metadata_matches(&no_label, &chapter_intro()));
    }

    #[test]
    fn test_multilingual_metadata_matches_by_position() {
        let meta = Metadata {
            label: list(&[Some("Kapitel"), Some("Chapter")]),
            value: list(&[Some("Einleitung"), Some("Intro")]),
        };
        assert!(metadata_matches(&meta, &chapter_intro()));
        assert!(metadata_matches(
            &meta,
            &[LabelValueCriterion::new("Kapitel", "Einleitung")]
        ));
    }

    #[test]
    fn test_multilingual_metadata_does_not_cross_positions() {
        let meta = Metadata {
            label: list(&[Some("Kapitel"), Some("Chapter")]),
            value: list(&[Some("Intro"), Some("Einleitung")]),
        };
        assert!(!metadata_matches(&meta, &chapter_intro()));
    }

    #[test]
    fn test_multilingual_missing_value_is_skipped() {
        let meta = Metadata {
            label: list(&[Some("Chapter"), Some("Chapter")]),
            value: list(&[None, Some("Intro")]),
        };
        assert!(metadata_matches(&meta, &chapter_intro()));

        let short = Metadata {
            label: list(&[Some("Kapitel"), Some("Chapter")]),
            value: list(&[Some("Einleitung")]),
        };
        assert!(!metadata_matches(&short, &chapter_intro()));
    }

    #[test]
    fn test_scalar_and_list_mismatch_never_matches() {
        let meta = Metadata {
            label: Some("Chapter".into()),
            value: list(&[Some("Intro")]),
        };
        assert!(!metadata_matches(&meta, &chapter_intro()));
    }

    #[test]
    fn test_any_of_several_criteria_matches() {
        let meta = Metadata::scalar("Strukturtyp", "Abbildung");
        let criteria = vec![
            LabelValueCriterion::new("Strukturtyp", "Kapitel"),
            LabelValueCriterion::new("Strukturtyp", "Abbildung"),
        ];
        assert!(metadata_matches(&meta, &criteria));
    }
}

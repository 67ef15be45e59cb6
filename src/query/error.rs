//! Error types for criterion parsing and page selection.

use thiserror::Error;

/// Errors raised while parsing a `Label::Value` criterion token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriterionError {
    /// The token does not contain the `::` separator.
    #[error(
        "invalid structure criterion '{token}': missing '::' separator\n  Suggestion: Use LABEL::VALUE, e.g. \"Strukturtyp::Kapitel\""
    )]
    MissingSeparator {
        /// The token as given.
        token: String,
    },

    /// The label part before `::` is empty.
    #[error("invalid structure criterion '{token}': label is empty")]
    EmptyLabel {
        /// The token as given.
        token: String,
    },
}

/// Errors raised by page selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The manifest has no sequence to take pages from.
    #[error("manifest has no sequence of pages")]
    NoSequence,

    /// More pages were requested than the filters leave selectable.
    #[error(
        "requested {requested} images but only {available} pages are selectable\n  Suggestion: Lower --maximum-images or relax the structure filters"
    )]
    CapExceedsSelectable {
        /// The requested maximum.
        requested: usize,
        /// Number of pages left after filtering.
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_error_missing_separator_message() {
        let err = CriterionError::MissingSeparator {
            token: "Strukturtyp:Kapitel".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Strukturtyp:Kapitel"), "should echo the token");
        assert!(msg.contains("LABEL::VALUE"), "should show expected shape");
    }

    #[test]
    fn test_selection_error_cap_message_has_counts() {
        let msg = SelectionError::CapExceedsSelectable {
            requested: 10,
            available: 3,
        }
        .to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains('3'));
    }
}

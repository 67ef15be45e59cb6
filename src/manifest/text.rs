//! Scalar-or-list text values used by IIIF labels and metadata.

use serde::Deserialize;
use serde::de::IgnoredAny;

/// A IIIF text property: either one plain string or an ordered list of
/// per-language strings.
///
/// List entries that are not strings or `{"@value": ...}` objects are kept
/// as `None` so that positions still line up between a metadata label and
/// its value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawText")]
pub enum LocalizedText {
    /// A single value, e.g. `"Strukturtyp"` or `{"@value": "Strukturtyp"}`.
    Scalar(String),
    /// One entry per language, in document order.
    List(Vec<Option<String>>),
}

impl LocalizedText {
    /// Returns the first available value.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value.as_str()),
            Self::List(values) => values.first().and_then(|v| v.as_deref()),
        }
    }

    /// Returns the entry at `index`, treating a scalar as a list of one.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        match self {
            Self::Scalar(value) => (index == 0).then_some(value.as_str()),
            Self::List(values) => values.get(index).and_then(|v| v.as_deref()),
        }
    }

    /// Returns true for the list form.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl From<&str> for LocalizedText {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Plain(String),
    Many(Vec<RawTextItem>),
    Tagged(LanguageValue),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTextItem {
    Plain(String),
    Tagged(LanguageValue),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
struct LanguageValue {
    #[serde(rename = "@value")]
    value: Option<String>,
}

impl From<RawText> for LocalizedText {
    fn from(raw: RawText) -> Self {
        match raw {
            RawText::Plain(value) => Self::Scalar(value),
            RawText::Tagged(tagged) => match tagged.value {
                Some(value) => Self::Scalar(value),
                None => Self::List(Vec::new()),
            },
            RawText::Many(items) => Self::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        RawTextItem::Plain(value) => Some(value),
                        RawTextItem::Tagged(tagged) => tagged.value,
                        RawTextItem::Other(_) => None,
                    })
                    .collect(),
            ),
        }
    }
}

//! Issue labels and the origin marker label.

use serde::{Deserialize, Serialize};

use super::repo_ref::RepoRef;

/// Prefix of every marker label name.
pub const MARKER_PREFIX: &str = "transferred-from: ";

/// Maximum length (in characters) of a generated marker label name.
pub const MAX_MARKER_LEN: usize = 50;

/// Color used when the marker label has to be created.
const MARKER_COLOR: &str = "ededed";

/// A label in its structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Label {
    /// A label carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            color: None,
        }
    }

    /// Whether this label is an origin marker.
    #[inline]
    #[must_use]
    pub fn is_marker(&self) -> bool {
        self.name.starts_with(MARKER_PREFIX)
    }
}

/// A label as trackers may send it: either a bare name or a full object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LabelInput {
    Name(String),
    Object(Label),
}

impl From<LabelInput> for Label {
    fn from(input: LabelInput) -> Self {
        match input {
            LabelInput::Name(name) => Label::named(name),
            LabelInput::Object(label) => label,
        }
    }
}

/// Synthesize the marker label recording that an issue came from `source`.
///
/// The name is cut to [`MAX_MARKER_LEN`] characters, so it stays a prefix of
/// the untruncated form.
#[must_use]
pub fn marker_label(source: &RepoRef) -> Label {
    let full = format!("{MARKER_PREFIX}{}", source.full_name());
    let name: String = full.chars().take(MAX_MARKER_LEN).collect();

    // Trackers cap label descriptions at 100 characters.
    let description: String = format!("Issue transferred from {}", source.full_name())
        .chars()
        .take(100)
        .collect();

    Label {
        name,
        description: Some(description),
        color: Some(MARKER_COLOR.to_string()),
    }
}

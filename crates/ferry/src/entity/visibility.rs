//! Visibility enum for repository access levels.

use serde::{Deserialize, Serialize};

/// Repository visibility as it matters for native transfer.
///
/// Trackers that report something finer grained (GitHub Enterprise
/// "internal") are folded into `Private`, the stricter of the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Map a tracker's private flag, treating an unreported flag as private.
    #[inline]
    #[must_use]
    pub fn from_private_flag(private: Option<bool>) -> Self {
        match private {
            Some(false) => Visibility::Public,
            Some(true) | None => Visibility::Private,
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

//! Common re-exports for convenient entity usage.

pub use super::issue::{Issue, NewIssue, NodeId, TransferredIssue, User};
pub use super::label::{Label, LabelInput, MARKER_PREFIX, MAX_MARKER_LEN, marker_label};
pub use super::repo_ref::{RepoRef, RepoRefError};
pub use super::visibility::Visibility;

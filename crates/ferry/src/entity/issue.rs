//! Issues as the transfer engine sees them.

use serde::{Deserialize, Serialize};

use super::label::Label;

/// A tracker user, identified by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

/// An issue read from a tracker, with labels already in structured form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub labels: Vec<Label>,
    pub assignee: Option<User>,
    pub assignees: Vec<User>,
    /// API URL of the repository the issue currently lives in.
    pub repository_url: String,
}

/// Opaque tracker-internal identifier (GraphQL node id on GitHub).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
}

impl NewIssue {
    /// Recreate `issue` with the given labels.
    ///
    /// The single `assignee` is only carried when there is no `assignees`
    /// list, since trackers disagree on how the two combine.
    pub fn copy_of(issue: &Issue, labels: &[Label]) -> Self {
        let assignees: Vec<String> = issue.assignees.iter().map(|u| u.login.clone()).collect();
        let assignee = if assignees.is_empty() {
            issue.assignee.as_ref().map(|u| u.login.clone())
        } else {
            None
        };

        Self {
            title: issue.title.clone(),
            body: issue.body.clone().unwrap_or_default(),
            labels: labels.iter().map(|l| l.name.clone()).collect(),
            assignee,
            assignees,
        }
    }
}

/// Result of a native transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferredIssue {
    pub id: NodeId,
    pub number: u64,
    pub url: String,
    pub state: String,
    pub title: String,
    pub labels: Vec<Label>,
    pub locked: bool,
}

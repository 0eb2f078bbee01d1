use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entity::prelude::{
    Issue, Label, NewIssue, NodeId, RepoRef, TransferredIssue, Visibility,
};

use super::errors::Result;

/// Rate limit information from a tracker.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Maximum requests allowed per period.
    pub limit: usize,
    /// Remaining requests in current period.
    pub remaining: usize,
    /// When the rate limit resets.
    pub reset_at: DateTime<Utc>,
}

/// Trait for issue tracker clients.
///
/// This is everything the transfer engine needs from a remote tracker. Every
/// method is a single remote call; pagination, caching and the transfer
/// decision live above this boundary.
///
/// # Implementation Notes
///
/// Implementors should:
/// - Return labels in structured form (normalize bare names at the boundary)
/// - Report a missing issue from [`get_issue`](Self::get_issue) as `Ok(None)`
/// - Convert tracker-specific errors to `TrackerError`
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// One page (1-indexed) of the repository's labels.
    async fn list_labels(&self, repo: &RepoRef, page: u32, per_page: u8) -> Result<Vec<Label>>;

    /// Create a label in the repository.
    async fn create_label(&self, repo: &RepoRef, label: &Label) -> Result<Label>;

    /// One page (1-indexed) of issues, open or closed, carrying `label`.
    async fn list_issues(
        &self,
        repo: &RepoRef,
        label: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Issue>>;

    /// Fetch a single issue, `None` if it does not exist or is inaccessible.
    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<Option<Issue>>;

    /// Create an issue.
    async fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> Result<Issue>;

    /// Add labels (by name) to an issue, returning the issue's labels afterwards.
    async fn add_labels(&self, repo: &RepoRef, number: u64, names: &[String])
    -> Result<Vec<Label>>;

    /// Resolve the repository's visibility.
    async fn get_visibility(&self, repo: &RepoRef) -> Result<Visibility>;

    /// Internal id of a repository, as accepted by [`transfer_issue`](Self::transfer_issue).
    async fn get_repository_id(&self, repo: &RepoRef) -> Result<NodeId>;

    /// Internal id of an issue, as accepted by [`transfer_issue`](Self::transfer_issue).
    async fn get_issue_id(&self, repo: &RepoRef, number: u64) -> Result<NodeId>;

    /// Natively move an issue into another repository.
    ///
    /// Only valid when both repositories share an owner and the visibility
    /// combination is allowed; labels are not retained.
    async fn transfer_issue(
        &self,
        issue_id: &NodeId,
        repository_id: &NodeId,
    ) -> Result<TransferredIssue>;

    /// Get current rate limit status.
    async fn get_rate_limit(&self) -> Result<RateLimitInfo>;
}

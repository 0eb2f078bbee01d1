use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

use crate::entity::prelude::{
    Issue, Label, NewIssue, NodeId, RepoRef, TransferredIssue, Visibility,
};

use super::errors::Result;
use super::types::{IssueTracker, RateLimitInfo};

/// Type alias for the governor rate limiter.
type GovernorRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// A rate-limited wrapper around any `IssueTracker`.
///
/// Every call waits until at least `delay` has passed since the previous
/// call was let through, whatever kind of call it is. A zero delay turns the
/// wrapper into a plain pass-through.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use ferry::github::GitHubClient;
/// use ferry::platform::RateLimitedTracker;
///
/// let client = GitHubClient::new(&token, None)?;
/// let client = RateLimitedTracker::new(client, Duration::from_millis(500));
/// ```
pub struct RateLimitedTracker<T> {
    inner: T,
    rate_limiter: Option<Arc<GovernorRateLimiter>>,
}

impl<T> RateLimitedTracker<T> {
    /// Wrap `inner`, spacing calls at least `delay` apart.
    pub fn new(inner: T, delay: Duration) -> Self {
        let rate_limiter = Quota::with_period(delay).map(|quota| Arc::new(RateLimiter::direct(quota)));

        Self {
            inner,
            rate_limiter,
        }
    }

    /// Get a reference to the inner tracker.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Wait for the rate limiter before making a request.
    async fn wait(&self) {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }
    }
}

// Implement Clone if the inner tracker is Clone; clones share one limiter.
impl<T: Clone> Clone for RateLimitedTracker<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            rate_limiter: self.rate_limiter.clone(),
        }
    }
}

#[async_trait]
impl<T: IssueTracker> IssueTracker for RateLimitedTracker<T> {
    async fn list_labels(&self, repo: &RepoRef, page: u32, per_page: u8) -> Result<Vec<Label>> {
        self.wait().await;
        self.inner.list_labels(repo, page, per_page).await
    }

    async fn create_label(&self, repo: &RepoRef, label: &Label) -> Result<Label> {
        self.wait().await;
        self.inner.create_label(repo, label).await
    }

    async fn list_issues(
        &self,
        repo: &RepoRef,
        label: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Issue>> {
        self.wait().await;
        self.inner.list_issues(repo, label, page, per_page).await
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<Option<Issue>> {
        self.wait().await;
        self.inner.get_issue(repo, number).await
    }

    async fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> Result<Issue> {
        self.wait().await;
        self.inner.create_issue(repo, issue).await
    }

    async fn add_labels(
        &self,
        repo: &RepoRef,
        number: u64,
        names: &[String],
    ) -> Result<Vec<Label>> {
        self.wait().await;
        self.inner.add_labels(repo, number, names).await
    }

    async fn get_visibility(&self, repo: &RepoRef) -> Result<Visibility> {
        self.wait().await;
        self.inner.get_visibility(repo).await
    }

    async fn get_repository_id(&self, repo: &RepoRef) -> Result<NodeId> {
        self.wait().await;
        self.inner.get_repository_id(repo).await
    }

    async fn get_issue_id(&self, repo: &RepoRef, number: u64) -> Result<NodeId> {
        self.wait().await;
        self.inner.get_issue_id(repo, number).await
    }

    async fn transfer_issue(
        &self,
        issue_id: &NodeId,
        repository_id: &NodeId,
    ) -> Result<TransferredIssue> {
        self.wait().await;
        self.inner.transfer_issue(issue_id, repository_id).await
    }

    async fn get_rate_limit(&self) -> Result<RateLimitInfo> {
        self.wait().await;
        self.inner.get_rate_limit().await
    }
}

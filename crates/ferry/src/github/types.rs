//! GitHub API wire types.
//!
//! Only the fields the transfer engine reads are modeled; everything else in
//! the payloads is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::prelude::{Label, LabelInput};

/// A user reference inside an issue payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub login: String,
}

/// An issue as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiIssue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    /// Bare names or label objects, depending on the endpoint.
    #[serde(default)]
    pub labels: Vec<LabelInput>,
    #[serde(default)]
    pub assignee: Option<ApiUser>,
    #[serde(default)]
    pub assignees: Option<Vec<ApiUser>>,
    /// API URL of the repository the issue currently lives in.
    pub repository_url: String,
}

/// The subset of `GET /repos/{owner}/{repo}` used to decide visibility.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
    #[serde(default)]
    pub private: Option<bool>,
}

/// Query parameters for paginated list endpoints.
#[derive(Debug, Serialize)]
pub struct PageParams {
    pub page: u32,
    pub per_page: u8,
}

/// Query parameters for `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Serialize)]
pub struct IssueListParams<'a> {
    pub labels: &'a str,
    pub state: &'static str,
    pub page: u32,
    pub per_page: u8,
}

/// Body of `POST /repos/{owner}/{repo}/issues/{number}/labels`.
#[derive(Debug, Serialize)]
pub struct AddLabelsBody<'a> {
    pub labels: &'a [String],
}

/// A single rate limit resource entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResource {
    /// Maximum requests allowed per period.
    pub limit: usize,
    /// Requests used in current period.
    #[serde(default)]
    pub used: usize,
    /// Remaining requests in current period.
    pub remaining: usize,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
}

impl RateLimitResource {
    /// Get the reset time as a DateTime.
    pub fn reset_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.reset as i64, 0).unwrap_or_else(Utc::now)
    }
}

/// The rate limit resources ferry consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRateLimits {
    /// Core API rate limit (non-search REST endpoints).
    pub core: RateLimitResource,
}

/// Full rate limit response from GitHub's API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRateLimitResponse {
    pub resources: GitHubRateLimits,
}

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// A node reference (`{ id }`).
#[derive(Debug, Deserialize)]
pub struct NodeRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryIdData {
    pub repository: Option<NodeRef>,
}

#[derive(Debug, Deserialize)]
pub struct IssueIdData {
    pub repository: Option<RepositoryIssue>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryIssue {
    pub issue: Option<NodeRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferIssueData {
    pub transfer_issue: Option<TransferIssuePayload>,
}

#[derive(Debug, Deserialize)]
pub struct TransferIssuePayload {
    pub issue: Option<GraphQlIssue>,
}

/// The issue returned by the `transferIssue` mutation.
#[derive(Debug, Deserialize)]
pub struct GraphQlIssue {
    pub id: String,
    pub number: u64,
    pub url: String,
    pub state: String,
    pub title: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub labels: Option<LabelConnection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LabelConnection {
    #[serde(default)]
    pub nodes: Vec<Label>,
}

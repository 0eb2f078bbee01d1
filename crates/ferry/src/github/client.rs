//! GitHub API client creation and the `IssueTracker` implementation.

use std::sync::Arc;

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::convert::{into_data, to_issue, to_transferred_issue, to_visibility};
use super::error::{GitHubError, is_not_found_error};
use super::graphql::{ISSUE_ID, REPOSITORY_ID, TRANSFER_ISSUE, payload};
use super::types::{
    AddLabelsBody, ApiIssue, ApiRepository, GitHubRateLimitResponse, GraphQlResponse,
    IssueIdData, IssueListParams, PageParams, RepositoryIdData, TransferIssueData,
};
use crate::entity::prelude::{
    Issue, Label, LabelInput, NewIssue, NodeId, RepoRef, TransferredIssue, Visibility,
};
use crate::platform::{self, IssueTracker, RateLimitInfo};

/// Create an authenticated Octocrab instance from a GitHub token.
///
/// `api_url` points at a GitHub Enterprise Server API root such as
/// `https://ghe.example.com/api/v3`; `None` targets github.com.
pub fn create_client(token: &str, api_url: Option<&str>) -> Result<Octocrab, GitHubError> {
    let mut builder = Octocrab::builder().personal_token(token.to_string());
    if let Some(api_url) = api_url {
        builder = builder.base_uri(api_url)?;
    }
    builder.build().map_err(GitHubError::Api)
}

/// Get current rate limit status (core API only).
pub async fn get_rate_limit(client: &Octocrab) -> Result<RateLimitInfo, GitHubError> {
    let response: GitHubRateLimitResponse = client.get("/rate_limit", None::<&()>).await?;
    let core = &response.resources.core;

    Ok(RateLimitInfo {
        limit: core.limit,
        remaining: core.remaining,
        reset_at: core.reset_at(),
    })
}

fn repo_route(repo: &RepoRef) -> String {
    format!("/repos/{}/{}", repo.owner(), repo.name())
}

/// GitHub API client implementing the `IssueTracker` trait.
///
/// Cloning is cheap: clones share one `Octocrab` instance.
#[derive(Clone)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
}

impl GitHubClient {
    /// Create a new GitHub client from an authentication token.
    pub fn new(token: &str, api_url: Option<&str>) -> Result<Self, GitHubError> {
        let client = create_client(token, api_url)?;
        Ok(Self::from_octocrab(client))
    }

    /// Create a GitHub client from an existing Octocrab instance.
    pub fn from_octocrab(client: Octocrab) -> Self {
        Self {
            inner: Arc::new(client),
        }
    }

    /// Run a GraphQL document and unwrap its `data`.
    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, GitHubError> {
        let response: GraphQlResponse<T> = self.inner.graphql(&payload(query, variables)).await?;
        into_data(response)
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn list_labels(
        &self,
        repo: &RepoRef,
        page: u32,
        per_page: u8,
    ) -> platform::Result<Vec<Label>> {
        let route = format!("{}/labels", repo_route(repo));
        let labels: Vec<LabelInput> = self
            .inner
            .get(&route, Some(&PageParams { page, per_page }))
            .await
            .map_err(GitHubError::Api)?;
        tracing::trace!(repository = %repo, page, count = labels.len(), "Listed labels");
        Ok(labels.into_iter().map(Label::from).collect())
    }

    async fn create_label(&self, repo: &RepoRef, label: &Label) -> platform::Result<Label> {
        let route = format!("{}/labels", repo_route(repo));
        let created: LabelInput = self
            .inner
            .post(&route, Some(label))
            .await
            .map_err(GitHubError::Api)?;
        Ok(created.into())
    }

    async fn list_issues(
        &self,
        repo: &RepoRef,
        label: &str,
        page: u32,
        per_page: u8,
    ) -> platform::Result<Vec<Issue>> {
        let route = format!("{}/issues", repo_route(repo));
        let params = IssueListParams {
            labels: label,
            state: "all",
            page,
            per_page,
        };
        let issues: Vec<ApiIssue> = self
            .inner
            .get(&route, Some(&params))
            .await
            .map_err(GitHubError::Api)?;
        tracing::trace!(repository = %repo, label, page, count = issues.len(), "Listed issues");
        Ok(issues.into_iter().map(to_issue).collect())
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> platform::Result<Option<Issue>> {
        let route = format!("{}/issues/{}", repo_route(repo), number);
        let response: Result<ApiIssue, octocrab::Error> =
            self.inner.get(&route, None::<&()>).await;

        match response {
            Ok(issue) => Ok(Some(to_issue(issue))),
            Err(e) if is_not_found_error(&e) => {
                tracing::debug!(repository = %repo, number, "Issue not found");
                Ok(None)
            }
            Err(e) => Err(GitHubError::Api(e).into()),
        }
    }

    async fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> platform::Result<Issue> {
        let route = format!("{}/issues", repo_route(repo));
        let created: ApiIssue = self
            .inner
            .post(&route, Some(issue))
            .await
            .map_err(GitHubError::Api)?;
        Ok(to_issue(created))
    }

    async fn add_labels(
        &self,
        repo: &RepoRef,
        number: u64,
        names: &[String],
    ) -> platform::Result<Vec<Label>> {
        let route = format!("{}/issues/{}/labels", repo_route(repo), number);
        let labels: Vec<LabelInput> = self
            .inner
            .post(&route, Some(&AddLabelsBody { labels: names }))
            .await
            .map_err(GitHubError::Api)?;
        Ok(labels.into_iter().map(Label::from).collect())
    }

    async fn get_visibility(&self, repo: &RepoRef) -> platform::Result<Visibility> {
        let repository: ApiRepository = self
            .inner
            .get(repo_route(repo), None::<&()>)
            .await
            .map_err(GitHubError::Api)?;
        Ok(to_visibility(&repository))
    }

    async fn get_repository_id(&self, repo: &RepoRef) -> platform::Result<NodeId> {
        let data: RepositoryIdData = self
            .graphql(
                REPOSITORY_ID,
                json!({"owner": repo.owner(), "name": repo.name()}),
            )
            .await?;

        data.repository
            .map(|node| NodeId(node.id))
            .ok_or_else(|| platform::TrackerError::not_found(format!("repository {repo}")))
    }

    async fn get_issue_id(&self, repo: &RepoRef, number: u64) -> platform::Result<NodeId> {
        let data: IssueIdData = self
            .graphql(
                ISSUE_ID,
                json!({"owner": repo.owner(), "name": repo.name(), "number": number}),
            )
            .await?;

        data.repository
            .and_then(|r| r.issue)
            .map(|node| NodeId(node.id))
            .ok_or_else(|| platform::TrackerError::not_found(format!("issue {repo}#{number}")))
    }

    async fn transfer_issue(
        &self,
        issue_id: &NodeId,
        repository_id: &NodeId,
    ) -> platform::Result<TransferredIssue> {
        let data: TransferIssueData = self
            .graphql(
                TRANSFER_ISSUE,
                json!({"issueId": issue_id.as_str(), "repositoryId": repository_id.as_str()}),
            )
            .await?;

        let issue = data
            .transfer_issue
            .and_then(|payload| payload.issue)
            .ok_or_else(|| GitHubError::Internal("transferIssue returned no issue".to_string()))?;
        Ok(to_transferred_issue(issue))
    }

    async fn get_rate_limit(&self) -> platform::Result<RateLimitInfo> {
        Ok(get_rate_limit(&self.inner).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    use super::*;
    use crate::platform::TrackerError;

    /// Answer a single request on a local port with `status` and a JSON `body`.
    fn serve_once(status: &'static str, body: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        std::thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        });
        port
    }

    fn local_client(port: u16) -> GitHubClient {
        GitHubClient::new("token", Some(&format!("http://127.0.0.1:{port}"))).unwrap()
    }

    #[test]
    fn test_repo_route() {
        assert_eq!(repo_route(&RepoRef::new("octo", "hello")), "/repos/octo/hello");
    }

    #[tokio::test]
    async fn test_client_for_enterprise_api() {
        let client = GitHubClient::new("token", Some("https://ghe.example.com/api/v3"));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_client_rejects_malformed_api_url() {
        let client = GitHubClient::new("token", Some("not a url"));
        assert!(matches!(client, Err(GitHubError::Api(_))));
    }

    #[tokio::test]
    async fn test_rate_limit_answer_maps_to_rate_limited() {
        let port = serve_once(
            "403 Forbidden",
            r#"{"message":"API rate limit exceeded for 203.0.113.7.","documentation_url":"https://docs.github.com/rest"}"#,
        );

        let err = local_client(port).get_rate_limit().await.unwrap_err();

        assert!(err.is_rate_limited(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_forbidden_without_rate_limit_stays_api_error() {
        let port = serve_once(
            "403 Forbidden",
            r#"{"message":"Resource not accessible by integration","documentation_url":"https://docs.github.com/rest"}"#,
        );

        let err = local_client(port).get_rate_limit().await.unwrap_err();

        assert!(matches!(err, TrackerError::Api { .. }), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_refused_connection_maps_to_network() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = local_client(port).get_rate_limit().await.unwrap_err();

        assert!(matches!(err, TrackerError::Network { .. }), "unexpected error: {err:?}");
    }
}

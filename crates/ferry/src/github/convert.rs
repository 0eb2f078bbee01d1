//! Conversion from GitHub wire types to ferry entities.

use crate::entity::prelude::{Issue, Label, NodeId, TransferredIssue, User, Visibility};

use super::error::GitHubError;
use super::types::{ApiIssue, ApiRepository, ApiUser, GraphQlIssue, GraphQlResponse};

fn to_user(user: ApiUser) -> User {
    User { login: user.login }
}

/// Convert a REST issue, normalizing its labels to structured form.
pub fn to_issue(issue: ApiIssue) -> Issue {
    Issue {
        number: issue.number,
        title: issue.title,
        body: issue.body,
        labels: issue.labels.into_iter().map(Label::from).collect(),
        assignee: issue.assignee.map(to_user),
        assignees: issue
            .assignees
            .unwrap_or_default()
            .into_iter()
            .map(to_user)
            .collect(),
        repository_url: issue.repository_url,
    }
}

/// Determine visibility from a repository payload.
///
/// A payload without a `private` flag is treated as private.
pub fn to_visibility(repo: &ApiRepository) -> Visibility {
    Visibility::from_private_flag(repo.private)
}

/// Convert the issue returned by the transfer mutation.
pub fn to_transferred_issue(issue: GraphQlIssue) -> TransferredIssue {
    TransferredIssue {
        id: NodeId(issue.id),
        number: issue.number,
        url: issue.url,
        state: issue.state,
        title: issue.title,
        labels: issue.labels.unwrap_or_default().nodes,
        locked: issue.locked,
    }
}

/// Unwrap a GraphQL response, turning reported errors into `GitHubError::GraphQl`.
pub fn into_data<T>(response: GraphQlResponse<T>) -> Result<T, GitHubError> {
    if !response.errors.is_empty() {
        let message = response
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(GitHubError::GraphQl(message));
    }

    response
        .data
        .ok_or_else(|| GitHubError::GraphQl("response carried no data".to_string()))
}

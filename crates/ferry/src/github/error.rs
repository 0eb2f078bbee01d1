//! GitHub API error types.

use chrono::Utc;
use thiserror::Error;

use crate::platform::{TrackerError, short_error_message};

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// HTTP status of an API error, if the server answered at all.
fn status_code(e: &octocrab::Error) -> Option<u16> {
    match e {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
        _ => None,
    }
}

/// Check if an error means the resource does not exist (404) or was deleted (410).
pub fn is_not_found_error(e: &octocrab::Error) -> bool {
    matches!(status_code(e), Some(404 | 410))
}

/// Check if an error means the credential was missing or rejected.
pub fn is_auth_error(e: &octocrab::Error) -> bool {
    status_code(e) == Some(401)
}

/// GitHub signals primary and secondary rate limits with 429, or with 403 and
/// a message naming the limit. A bare 403 is a permission problem.
fn is_rate_limit_response(status: u16, message: &str) -> bool {
    status == 429 || (status == 403 && message.to_ascii_lowercase().contains("rate limit"))
}

/// Check if an error indicates a rate limit.
pub fn is_rate_limit_error(e: &octocrab::Error) -> bool {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            is_rate_limit_response(source.status_code.as_u16(), &source.message)
        }
        _ => false,
    }
}

/// Check if the request never got an answer (connection, TLS, protocol).
pub fn is_network_error(e: &octocrab::Error) -> bool {
    matches!(
        e,
        octocrab::Error::Hyper { .. } | octocrab::Error::Service { .. } | octocrab::Error::Http { .. }
    )
}

impl From<GitHubError> for TrackerError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Api(e) if is_auth_error(&e) => TrackerError::AuthRequired,
            // The error body carries no reset time.
            GitHubError::Api(e) if is_rate_limit_error(&e) => TrackerError::RateLimited {
                reset_at: Utc::now(),
            },
            GitHubError::Api(e) if is_not_found_error(&e) => {
                TrackerError::not_found(short_error_message(&e))
            }
            GitHubError::Api(e) if is_network_error(&e) => {
                TrackerError::network(short_error_message(&e))
            }
            GitHubError::Api(e) => TrackerError::api(e.to_string()),
            GitHubError::GraphQl(msg) => TrackerError::api(msg),
            GitHubError::Internal(msg) => TrackerError::internal(msg),
        }
    }
}

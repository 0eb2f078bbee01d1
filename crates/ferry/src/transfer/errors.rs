use thiserror::Error;

use crate::entity::prelude::RepoRefError;
use crate::platform::TrackerError;

/// Errors that abort a transfer run.
///
/// A skipped duplicate is not an error; it is reported as an outcome.
#[derive(Debug, Error)]
pub enum TransferError {
    /// A configured repository identifier is not of the form `owner/repo`.
    #[error("Invalid repository '{value}': expected owner/repo")]
    InvalidRepoRef { value: String },

    /// An issue's repository URL could not be turned into `owner/repo`.
    #[error("Cannot derive repository from URL '{url}'")]
    InvalidOriginUrl { url: String },

    /// A requested issue does not exist in the source repository.
    #[error("Issue #{number} not found in {repository}")]
    IssueNotFound { repository: String, number: u64 },

    /// The issue-number input contained no usable number.
    #[error("No issue numbers given")]
    NoIssueNumbers,

    /// A remote call failed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

impl From<RepoRefError> for TransferError {
    fn from(err: RepoRefError) -> Self {
        match err {
            RepoRefError::InvalidFormat { value } => Self::InvalidRepoRef { value },
            RepoRefError::InvalidApiUrl { url } => Self::InvalidOriginUrl { url },
        }
    }
}

/// Result type for transfer operations.
pub type Result<T> = std::result::Result<T, TransferError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_not_found_display() {
        let err = TransferError::IssueNotFound {
            repository: "org/repo".to_string(),
            number: 42,
        };
        assert_eq!(err.to_string(), "Issue #42 not found in org/repo");
    }

    #[test]
    fn test_tracker_error_is_transparent() {
        let err: TransferError = TrackerError::api("Bad credentials").into();
        assert_eq!(err.to_string(), "API error: Bad credentials");
        assert!(matches!(err, TransferError::Tracker(_)));
    }

    #[test]
    fn test_repo_ref_errors_keep_their_message() {
        let parse = "nope".parse::<crate::entity::prelude::RepoRef>().unwrap_err();
        let err: TransferError = parse.into();
        assert!(matches!(err, TransferError::InvalidRepoRef { ref value } if value == "nope"));
        assert_eq!(err.to_string(), "Invalid repository 'nope': expected owner/repo");

        let err: TransferError = RepoRefError::InvalidApiUrl {
            url: "https://api.github.com/users/octo".to_string(),
        }
        .into();
        assert!(matches!(err, TransferError::InvalidOriginUrl { .. }));
    }
}

//! Tracker-agnostic boundary for issue tracker clients.
//!
//! This module defines the `IssueTracker` trait: the remote capabilities the
//! transfer engine relies on. Concrete clients (see [`crate::github`]) and
//! decorators such as [`RateLimitedTracker`] implement it.
//!
//! # Example
//!
//! ```ignore
//! use ferry::entity::prelude::RepoRef;
//! use ferry::platform::{IssueTracker, TrackerError};
//!
//! async fn show<T: IssueTracker>(tracker: &T, repo: &RepoRef) -> Result<(), TrackerError> {
//!     if let Some(issue) = tracker.get_issue(repo, 1).await? {
//!         println!("#{} {}", issue.number, issue.title);
//!     }
//!     Ok(())
//! }
//! ```

mod errors;
#[cfg(test)]
pub(crate) mod memory;
mod rate_limit;
mod types;

pub use errors::{Result, TrackerError, short_error_message};
pub use rate_limit::RateLimitedTracker;
pub use types::{IssueTracker, RateLimitInfo};

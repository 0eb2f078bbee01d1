//! Ferry - idempotent issue transfer between tracker repositories.
//!
//! Ferry moves issues from one repository to another. When the tracker allows
//! it (same owner, compatible visibility) the native transfer primitive is
//! used; otherwise the issue is recreated at the destination. Every issue
//! that arrives carries a `transferred-from: owner/repo` marker label, which
//! lets a later run recognize it and skip it.
//!
//! # Features
//!
//! - `github` (default) - The GitHub client in [`github`].
//!
//! # Example
//!
//! ```ignore
//! use ferry::github::GitHubClient;
//! use ferry::transfer::{TransferEngine, parse_issue_numbers};
//!
//! let client = GitHubClient::new(&token, None)?;
//! let numbers = parse_issue_numbers("1 2 3")?;
//! let mut engine = TransferEngine::new(client, "org/old", "org/new")?;
//! let summary = engine.run(&numbers, None).await?;
//! ```

pub mod cache;
pub mod entity;
pub mod pagination;
pub mod platform;
pub mod repository;
pub mod transfer;

#[cfg(feature = "github")]
pub mod github;

pub use entity::prelude::*;
pub use platform::{IssueTracker, RateLimitInfo, RateLimitedTracker, TrackerError};
pub use repository::{Repository, TransferMode, TransferOutcome};
pub use transfer::{TransferEngine, TransferError, TransferSummary, parse_issue_numbers};

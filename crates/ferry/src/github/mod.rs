//! GitHub implementation of the issue tracker boundary.
//!
//! REST covers labels, issues and repository metadata; GraphQL covers the
//! node ids and the `transferIssue` mutation, which REST does not expose.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - `types` - Wire types for REST and GraphQL payloads
//! - `graphql` - GraphQL documents
//! - `client` - Client creation and the `IssueTracker` implementation
//! - `convert` - Conversion to ferry entities
//!
//! # Example
//!
//! ```ignore
//! use ferry::github::GitHubClient;
//! use ferry::transfer::TransferEngine;
//!
//! let client = GitHubClient::new(&token, None)?;
//! let mut engine = TransferEngine::new(client, "org/old", "org/new")?;
//! ```

mod client;
mod convert;
pub mod error;
mod graphql;
mod types;

pub use client::{GitHubClient, create_client, get_rate_limit};
pub use error::GitHubError;
pub use types::{GitHubRateLimitResponse, GitHubRateLimits, RateLimitResource};

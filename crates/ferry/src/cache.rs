//! Per-repository, per-run caches.
//!
//! Both caches are filled on first use through the paginated fetcher and are
//! never invalidated. Entries this run creates are appended so later
//! decisions in the same run see them.

mod issues;
mod labels;

pub use issues::{CachedIssue, IssueCache};
pub use labels::LabelCache;

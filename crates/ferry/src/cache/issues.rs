use std::collections::HashMap;

use crate::entity::prelude::{RepoRef, marker_label};
use crate::pagination::fetch_all_pages;
use crate::platform::{IssueTracker, Result};

/// The part of a destination issue duplicate detection looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedIssue {
    pub number: u64,
    pub title: String,
}

/// Issues in one repository that carry a given origin's marker label.
///
/// Keyed by origin, each origin filled at most once. Duplicate detection is
/// by exact title, so two distinct source issues with the same title look
/// like duplicates of each other.
#[derive(Debug, Default)]
pub struct IssueCache {
    by_origin: HashMap<RepoRef, Vec<CachedIssue>>,
}

impl IssueCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_populated(&self, origin: &RepoRef) -> bool {
        self.by_origin.contains_key(origin)
    }

    /// Fetch every issue of `repo` (open or closed) marked as coming from
    /// `origin`, unless that already happened.
    pub async fn ensure_populated<T>(
        &mut self,
        tracker: &T,
        repo: &RepoRef,
        origin: &RepoRef,
    ) -> Result<()>
    where
        T: IssueTracker + ?Sized,
    {
        if self.is_populated(origin) {
            return Ok(());
        }

        let marker = marker_label(origin).name;
        let filter = marker.as_str();
        let issues = fetch_all_pages(move |page, per_page| {
            tracker.list_issues(repo, filter, page, per_page)
        })
        .await?;

        tracing::debug!(
            repository = %repo,
            origin = %origin,
            count = issues.len(),
            "Cached previously transferred issues"
        );

        let entries = issues
            .into_iter()
            .map(|issue| CachedIssue {
                number: issue.number,
                title: issue.title,
            })
            .collect();
        self.by_origin.insert(origin.clone(), entries);
        Ok(())
    }

    /// An issue from `origin` with exactly this title, if one was seen.
    pub fn find_duplicate(&self, origin: &RepoRef, title: &str) -> Option<&CachedIssue> {
        self.by_origin
            .get(origin)?
            .iter()
            .find(|issue| issue.title == title)
    }

    /// Remember an issue this run placed in the repository.
    ///
    /// Ignored for an origin that has not been populated yet; the first
    /// population will see the issue on the tracker.
    pub fn record(&mut self, origin: &RepoRef, number: u64, title: impl Into<String>) {
        if let Some(entries) = self.by_origin.get_mut(origin) {
            entries.push(CachedIssue {
                number,
                title: title.into(),
            });
        }
    }
}

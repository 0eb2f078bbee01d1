//! The repository model: one tracker repository plus its caches.
//!
//! A [`Repository`] is the destination-side aggregate of a transfer run. It
//! owns the label cache and the issue cache for its repository, resolves its
//! visibility at most once, and decides for each incoming issue whether it is
//! a duplicate, can be moved natively, or has to be recreated.
//!
//! # Transfer decision
//!
//! ```text
//! fetched -> duplicate check -> skipped
//!                            -> labels prepared -> native transfer
//!                                               -> copy
//! ```
//!
//! Native transfer needs both repositories under the same owner and a
//! visibility combination the tracker accepts: a public source may go
//! anywhere, a private source only to another private repository.

use serde::Serialize;

use crate::cache::{IssueCache, LabelCache};
use crate::entity::prelude::{
    Issue, Label, NewIssue, RepoRef, TransferredIssue, Visibility, marker_label,
};
use crate::platform::{self, IssueTracker};
use crate::transfer::TransferError;

/// How an issue gets to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// The tracker's own transfer primitive; the issue keeps its history.
    Native,
    /// A new issue is created at the destination.
    Copy,
}

impl TransferMode {
    /// Choose the mode for moving an issue from `source` to `destination`.
    #[must_use]
    pub fn select(
        source: &RepoRef,
        source_visibility: Visibility,
        destination: &RepoRef,
        destination_visibility: Visibility,
    ) -> Self {
        let same_owner = source.same_owner(destination);
        let visibility_allowed = match (source_visibility, destination_visibility) {
            (Visibility::Public, _) => true,
            (Visibility::Private, Visibility::Private) => true,
            (Visibility::Private, Visibility::Public) => false,
        };

        if same_owner && visibility_allowed {
            Self::Native
        } else {
            Self::Copy
        }
    }
}

impl std::fmt::Display for TransferMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "transferred"),
            Self::Copy => write!(f, "copied"),
        }
    }
}

/// Result of handing one issue to the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The destination already has an issue with this title from this origin.
    Skipped {
        /// Number of the existing destination issue.
        duplicate: u64,
    },
    /// Moved with the native primitive, labels re-applied.
    Transferred(TransferredIssue),
    /// Recreated at the destination.
    Copied(Issue),
}

impl TransferOutcome {
    /// Number of the issue this run placed at the destination.
    pub fn destination_number(&self) -> Option<u64> {
        match self {
            Self::Skipped { .. } => None,
            Self::Transferred(issue) => Some(issue.number),
            Self::Copied(issue) => Some(issue.number),
        }
    }

    pub fn mode(&self) -> Option<TransferMode> {
        match self {
            Self::Skipped { .. } => None,
            Self::Transferred(_) => Some(TransferMode::Native),
            Self::Copied(_) => Some(TransferMode::Copy),
        }
    }
}

/// Build the label set for an issue arriving from `origin`.
///
/// The marker comes first. Markers left over from earlier hops are dropped
/// and repeated names collapse to their first occurrence.
pub fn prepare_labels(marker: &Label, labels: &[Label]) -> Vec<Label> {
    let mut prepared = vec![marker.clone()];
    for label in labels {
        if label.is_marker() || prepared.iter().any(|l| l.name == label.name) {
            continue;
        }
        prepared.push(label.clone());
    }
    prepared
}

/// One tracker repository with its per-run caches.
pub struct Repository<T> {
    tracker: T,
    reference: RepoRef,
    visibility: Option<Visibility>,
    labels: LabelCache,
    issues: IssueCache,
}

impl<T: IssueTracker + Clone> Repository<T> {
    pub fn new(tracker: T, reference: RepoRef) -> Self {
        Self {
            tracker,
            reference,
            visibility: None,
            labels: LabelCache::new(),
            issues: IssueCache::new(),
        }
    }

    #[inline]
    pub fn reference(&self) -> &RepoRef {
        &self.reference
    }

    /// The repository's visibility, fetched on first use.
    pub async fn visibility(&mut self) -> platform::Result<Visibility> {
        if let Some(visibility) = self.visibility {
            return Ok(visibility);
        }

        let visibility = self.tracker.get_visibility(&self.reference).await?;
        tracing::debug!(repository = %self.reference, %visibility, "Resolved visibility");
        self.visibility = Some(visibility);
        Ok(visibility)
    }

    /// Fetch one issue, `None` if the tracker does not have it.
    pub async fn get_issue(&self, number: u64) -> platform::Result<Option<Issue>> {
        self.tracker.get_issue(&self.reference, number).await
    }

    /// Make sure a label named like `label` exists here.
    pub async fn ensure_label(&mut self, label: &Label) -> platform::Result<Label> {
        self.labels
            .create_if_absent(&self.tracker, &self.reference, label)
            .await
    }

    /// Bring `issue` into this repository.
    ///
    /// The issue's origin is read from its repository URL, which may differ
    /// from the configured source when the issue was moved before.
    pub async fn transfer(&mut self, issue: &Issue) -> Result<TransferOutcome, TransferError> {
        let origin = RepoRef::from_api_url(&issue.repository_url)?;

        self.issues
            .ensure_populated(&self.tracker, &self.reference, &origin)
            .await?;
        if let Some(existing) = self.issues.find_duplicate(&origin, &issue.title) {
            tracing::info!(
                source = %origin,
                destination = %self.reference,
                number = issue.number,
                duplicate = existing.number,
                title = %issue.title,
                "Issue already transferred, skipping"
            );
            return Ok(TransferOutcome::Skipped {
                duplicate: existing.number,
            });
        }

        let labels = prepare_labels(&marker_label(&origin), &issue.labels);
        for label in &labels {
            self.ensure_label(label).await?;
        }

        let mut source = Repository::new(self.tracker.clone(), origin);
        let source_visibility = source.visibility().await?;
        let destination_visibility = self.visibility().await?;
        let mode = TransferMode::select(
            source.reference(),
            source_visibility,
            &self.reference,
            destination_visibility,
        );
        tracing::debug!(
            source = %source.reference(),
            destination = %self.reference,
            number = issue.number,
            %source_visibility,
            %destination_visibility,
            ?mode,
            "Selected transfer mode"
        );

        let outcome = match mode {
            TransferMode::Native => {
                TransferOutcome::Transferred(self.move_issue(source.reference(), issue, labels).await?)
            }
            TransferMode::Copy => {
                let new_issue = NewIssue::copy_of(issue, &labels);
                TransferOutcome::Copied(self.tracker.create_issue(&self.reference, &new_issue).await?)
            }
        };

        if let Some(number) = outcome.destination_number() {
            self.issues.record(source.reference(), number, issue.title.clone());
        }
        Ok(outcome)
    }

    /// Native transfer followed by re-applying the prepared labels, which the
    /// tracker drops on the way.
    async fn move_issue(
        &self,
        source: &RepoRef,
        issue: &Issue,
        labels: Vec<Label>,
    ) -> platform::Result<TransferredIssue> {
        let issue_id = self.tracker.get_issue_id(source, issue.number).await?;
        let repository_id = self.tracker.get_repository_id(&self.reference).await?;
        let mut moved = self.tracker.transfer_issue(&issue_id, &repository_id).await?;

        let names: Vec<String> = labels.iter().map(|l| l.name.clone()).collect();
        self.tracker
            .add_labels(&self.reference, moved.number, &names)
            .await?;
        moved.labels = labels;
        Ok(moved)
    }
}

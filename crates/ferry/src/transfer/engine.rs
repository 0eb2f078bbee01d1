//! Batch transfer driver.
//!
//! For every requested number, in ascending order, the engine fetches the
//! issue from the source repository and hands it to the destination model.
//! The first fatal error stops the batch; issues handled before it stay
//! where they were put, so re-running the same input is safe.
//!
//! # Example
//!
//! ```ignore
//! use ferry::transfer::{TransferEngine, parse_issue_numbers};
//!
//! let numbers = parse_issue_numbers("1 2 3")?;
//! let mut engine = TransferEngine::new(client, "org/old", "org/new")?;
//! let summary = engine.run(&numbers, None).await?;
//! println!("{} placed, {} skipped", summary.placed(), summary.skipped);
//! ```

use std::collections::BTreeSet;

use crate::entity::prelude::RepoRef;
use crate::platform::IssueTracker;
use crate::repository::{Repository, TransferOutcome};

use super::errors::{Result, TransferError};
use super::progress::{ProgressCallback, TransferProgress, emit};
use super::types::{TransferRecord, TransferSummary};

/// Moves batches of issues from one repository to another.
pub struct TransferEngine<T> {
    source: Repository<T>,
    destination: Repository<T>,
}

impl<T: IssueTracker + Clone> TransferEngine<T> {
    /// Validate both identifiers and set up the two repository models.
    ///
    /// Nothing is sent to the tracker here.
    pub fn new(tracker: T, source: &str, destination: &str) -> Result<Self> {
        let source: RepoRef = source.parse()?;
        let destination: RepoRef = destination.parse()?;

        Ok(Self {
            source: Repository::new(tracker.clone(), source),
            destination: Repository::new(tracker, destination),
        })
    }

    pub fn source(&self) -> &RepoRef {
        self.source.reference()
    }

    pub fn destination(&self) -> &RepoRef {
        self.destination.reference()
    }

    /// Transfer every issue in `numbers`.
    pub async fn run(
        &mut self,
        numbers: &BTreeSet<u64>,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<TransferSummary> {
        let source = self.source.reference().to_string();
        let destination = self.destination.reference().to_string();

        emit(
            on_progress,
            TransferProgress::Starting {
                source: source.clone(),
                destination: destination.clone(),
                count: numbers.len(),
            },
        );

        let mut summary = TransferSummary::default();
        for &number in numbers {
            let outcome = self.transfer_one(number, on_progress).await?;

            if let (Some(destination_number), Some(mode)) =
                (outcome.destination_number(), outcome.mode())
            {
                tracing::info!(
                    source = %source,
                    destination = %destination,
                    source_number = number,
                    destination_number,
                    %mode,
                    "Issue placed at destination"
                );
                emit(
                    on_progress,
                    TransferProgress::Transferred {
                        source: source.clone(),
                        destination: destination.clone(),
                        source_number: number,
                        destination_number,
                        mode,
                    },
                );
            } else if let TransferOutcome::Skipped { duplicate } = &outcome {
                emit(
                    on_progress,
                    TransferProgress::Skipped {
                        source: source.clone(),
                        destination: destination.clone(),
                        number,
                        duplicate: *duplicate,
                    },
                );
            }

            summary.push(TransferRecord::from_outcome(number, &outcome));
        }

        emit(
            on_progress,
            TransferProgress::Complete {
                transferred: summary.transferred,
                copied: summary.copied,
                skipped: summary.skipped,
            },
        );
        Ok(summary)
    }

    async fn transfer_one(
        &mut self,
        number: u64,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<TransferOutcome> {
        emit(on_progress, TransferProgress::FetchingIssue { number });

        let issue = self
            .source
            .get_issue(number)
            .await?
            .ok_or_else(|| TransferError::IssueNotFound {
                repository: self.source.reference().to_string(),
                number,
            })?;
        tracing::debug!(source = %self.source.reference(), number, title = %issue.title, "Fetched issue");

        self.destination.transfer(&issue).await
    }
}

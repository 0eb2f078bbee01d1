use serde::Serialize;

use crate::repository::{TransferMode, TransferOutcome};

/// What happened to one requested issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum TransferStatus {
    /// Moved or copied; the destination number is known.
    Placed {
        mode: TransferMode,
        destination_number: u64,
    },
    /// An issue with the same title from the same origin already existed.
    Skipped {
        /// Number of the existing issue at the destination.
        duplicate: u64,
    },
}

/// Per-issue record of a transfer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    /// Issue number in the source repository.
    pub source_number: u64,
    #[serde(flatten)]
    pub status: TransferStatus,
}

impl TransferRecord {
    pub(crate) fn from_outcome(source_number: u64, outcome: &TransferOutcome) -> Self {
        let status = match outcome {
            TransferOutcome::Skipped { duplicate } => TransferStatus::Skipped {
                duplicate: *duplicate,
            },
            TransferOutcome::Transferred(issue) => TransferStatus::Placed {
                mode: TransferMode::Native,
                destination_number: issue.number,
            },
            TransferOutcome::Copied(issue) => TransferStatus::Placed {
                mode: TransferMode::Copy,
                destination_number: issue.number,
            },
        };

        Self {
            source_number,
            status,
        }
    }
}

/// Result of a transfer run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct TransferSummary {
    /// One record per requested issue, in processing order.
    pub records: Vec<TransferRecord>,
    /// Number of issues moved natively.
    pub transferred: usize,
    /// Number of issues recreated at the destination.
    pub copied: usize,
    /// Number of duplicates skipped.
    pub skipped: usize,
}

impl TransferSummary {
    pub(crate) fn push(&mut self, record: TransferRecord) {
        match &record.status {
            TransferStatus::Placed {
                mode: TransferMode::Native,
                ..
            } => self.transferred += 1,
            TransferStatus::Placed {
                mode: TransferMode::Copy,
                ..
            } => self.copied += 1,
            TransferStatus::Skipped { .. } => self.skipped += 1,
        }
        self.records.push(record);
    }

    /// Number of issues now present at the destination because of this run.
    #[inline]
    pub fn placed(&self) -> usize {
        self.transferred + self.copied
    }
}

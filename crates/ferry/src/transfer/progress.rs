//! Progress reporting types for transfer runs.

use crate::repository::TransferMode;

/// Progress events emitted while a batch of issues is transferred.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum TransferProgress {
    /// The batch is about to start.
    Starting {
        /// Source repository (`owner/repo`).
        source: String,
        /// Destination repository (`owner/repo`).
        destination: String,
        /// Number of distinct issues requested.
        count: usize,
    },

    /// Fetching an issue from the source.
    FetchingIssue {
        /// Issue number in the source repository.
        number: u64,
    },

    /// The destination already holds an issue with this title from this origin.
    Skipped {
        source: String,
        destination: String,
        /// Issue number in the source repository.
        number: u64,
        /// Number of the matching issue at the destination.
        duplicate: u64,
    },

    /// An issue now exists at the destination.
    Transferred {
        source: String,
        destination: String,
        source_number: u64,
        destination_number: u64,
        /// Whether the issue was moved natively or recreated.
        mode: TransferMode,
    },

    /// The batch finished.
    Complete {
        /// Issues moved with the native primitive.
        transferred: usize,
        /// Issues recreated at the destination.
        copied: usize,
        /// Issues skipped as duplicates.
        skipped: usize,
    },
}

/// Callback for progress updates during a transfer run.
pub type ProgressCallback = Box<dyn Fn(TransferProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
///
/// # Example
///
/// ```ignore
/// use ferry::transfer::{emit, ProgressCallback, TransferProgress};
///
/// fn step(on_progress: Option<&ProgressCallback>) {
///     emit(on_progress, TransferProgress::FetchingIssue { number: 7 });
/// }
/// ```
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: TransferProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}

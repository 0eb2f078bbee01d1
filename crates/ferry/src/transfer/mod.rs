//! Batch issue transfer.
//!
//! # Module Structure
//!
//! - [`engine`] - `TransferEngine`: fetch from source, place at destination
//! - [`input`] - `parse_issue_numbers()`: lenient issue-number parsing
//! - `progress` - `TransferProgress`, `ProgressCallback`, `emit()`
//! - `types` - `TransferSummary` and per-issue records
//! - `errors` - `TransferError`

pub mod engine;
mod errors;
pub mod input;
mod progress;
mod types;

pub use engine::TransferEngine;
pub use errors::{Result, TransferError};
pub use input::parse_issue_numbers;
pub use progress::{ProgressCallback, TransferProgress, emit};
pub use types::{TransferRecord, TransferStatus, TransferSummary};

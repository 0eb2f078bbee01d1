//! Lenient parsing of the issue-number list.

use std::collections::BTreeSet;

use super::errors::{Result, TransferError};

/// Parse a whitespace-separated list of issue numbers.
///
/// Tokens that are not unsigned integers are dropped without complaint and
/// repeats collapse, so `"1 abc 2 2"` yields `{1, 2}`. An input with nothing
/// usable is an error.
pub fn parse_issue_numbers(input: &str) -> Result<BTreeSet<u64>> {
    let numbers: BTreeSet<u64> = input
        .split_whitespace()
        .filter_map(|token| match token.parse::<u64>() {
            Ok(number) => Some(number),
            Err(_) => {
                tracing::debug!(token, "Ignoring non-numeric issue token");
                None
            }
        })
        .collect();

    if numbers.is_empty() {
        return Err(TransferError::NoIssueNumbers);
    }
    Ok(numbers)
}

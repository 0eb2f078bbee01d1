use ferry::transfer::TransferProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: TransferProgress) {
        match event {
            TransferProgress::Starting {
                source,
                destination,
                count,
            } => {
                tracing::info!(source = %source, destination = %destination, count, "Transferring issues");
            }

            TransferProgress::FetchingIssue { number } => {
                tracing::debug!(number, "Fetching issue");
            }

            TransferProgress::Skipped {
                source,
                destination,
                number,
                duplicate,
            } => {
                tracing::info!(
                    source = %source,
                    destination = %destination,
                    number,
                    duplicate,
                    "Already transferred, skipped"
                );
            }

            TransferProgress::Transferred {
                source,
                destination,
                source_number,
                destination_number,
                mode,
            } => {
                tracing::info!(
                    from = %format!("{}#{}", source, source_number),
                    to = %format!("{}#{}", destination, destination_number),
                    "Issue {}", mode
                );
            }

            TransferProgress::Complete {
                transferred,
                copied,
                skipped,
            } => {
                tracing::info!(transferred, copied, skipped, "Transfer complete");
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::Arc;
use std::time::Duration;

use ferry::github::GitHubClient;
use ferry::platform::{IssueTracker, RateLimitedTracker, TrackerError, short_error_message};
use ferry::transfer::{TransferEngine, parse_issue_numbers};

use crate::TransferArgs;
use crate::config::Config;
use crate::progress::ProgressReporter;

/// Transfer issues between two GitHub repositories.
pub(crate) async fn handle_transfer(
    args: TransferArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let numbers = parse_issue_numbers(&args.issue_numbers)?;

    let token = config.github_token().ok_or(
        "GitHub token not configured. Set FERRY_GITHUB_TOKEN or GITHUB_TOKEN, \
         or add it to ~/.config/ferry/config.toml",
    )?;
    let delay = Duration::from_millis(args.delay_ms.unwrap_or(config.transfer.request_delay_ms));

    let client = GitHubClient::new(&token, config.github.api_url.as_deref())?;
    let client = RateLimitedTracker::new(client, delay);
    let mut engine = TransferEngine::new(client.clone(), &args.source, &args.destination)?;

    check_rate_limit(&client).await?;

    let reporter = Arc::new(ProgressReporter::new());
    let callback = reporter.as_callback();
    let result = engine.run(&numbers, Some(&*callback)).await;
    reporter.finish();

    result?;
    Ok(())
}

/// Log the remaining quota and refuse to start when it is exhausted.
///
/// Failing to read the quota is not fatal; some Enterprise installs disable
/// the endpoint.
async fn check_rate_limit<T: IssueTracker>(tracker: &T) -> Result<(), TrackerError> {
    match tracker.get_rate_limit().await {
        Ok(info) if info.remaining == 0 => Err(TrackerError::RateLimited {
            reset_at: info.reset_at,
        }),
        Ok(info) => {
            tracing::info!(
                remaining = info.remaining,
                limit = info.limit,
                reset_at = %info.reset_at,
                "GitHub rate limit"
            );
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %short_error_message(&e), "Could not read rate limit");
            Ok(())
        }
    }
}

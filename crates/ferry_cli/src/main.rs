//! Ferry CLI - move issues between GitHub repositories.

mod commands;
mod config;
#[cfg(feature = "github")]
mod progress;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ferry")]
#[command(version)]
#[command(about = "Idempotent issue transfer between GitHub repositories")]
#[command(
    long_about = "Ferry moves issues from one repository to another. Issues in the same \
organization are moved with GitHub's native transfer when visibility allows it; \
everything else is recreated at the destination. Each moved issue is labeled \
'transferred-from: owner/repo', so re-running the same command skips issues that \
already arrived."
)]
#[command(after_long_help = r#"EXAMPLES
    Move issues 12 and 15 to another repository:
        $ ferry transfer my-org/old-repo my-org/new-repo "12 15"

    Copy across organizations, pacing requests half a second apart:
        $ ferry transfer org-a/app org-b/app "1 2 3" --delay-ms 500

    Generate shell completions:
        $ ferry completions bash > ~/.local/share/bash-completion/completions/ferry

CONFIGURATION
    Ferry reads configuration from:
      1. ~/.config/ferry/config.toml (or $XDG_CONFIG_HOME/ferry/config.toml)
      2. ./ferry.toml
      3. Environment variables (FERRY_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    FERRY_GITHUB_TOKEN               GitHub personal access token
    GITHUB_TOKEN                     Used when FERRY_GITHUB_TOKEN is not set
    FERRY_GITHUB_API_URL             API root for GitHub Enterprise Server
    FERRY_TRANSFER_REQUEST_DELAY_MS  Minimum delay between API requests
    INPUT_SOURCE, INPUT_DESTINATION, INPUT_ISSUE_NUMBERS
                                     Defaults for the transfer arguments
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transfer issues from one repository to another
    #[cfg(feature = "github")]
    Transfer(TransferArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Arguments of `ferry transfer`.
#[derive(Debug, Clone, clap::Args)]
struct TransferArgs {
    /// Repository to take issues from (owner/repo)
    #[arg(env = "INPUT_SOURCE")]
    source: String,

    /// Repository to put issues into (owner/repo)
    #[arg(env = "INPUT_DESTINATION")]
    destination: String,

    /// Whitespace-separated issue numbers, e.g. "1 2 3"
    #[arg(env = "INPUT_ISSUE_NUMBERS")]
    issue_numbers: String,

    /// Minimum delay between API requests in milliseconds (default from config or 0)
    #[arg(short = 'd', long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Structured logging only when not attached to a terminal
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("ferry=info,ferry_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "github")]
        Commands::Transfer(args) => {
            let config = config::Config::load();
            commands::transfer::handle_transfer(args, &config).await?;
        }
        Commands::Completions { shell } => {
            commands::meta::handle_completions(shell)?;
        }
        Commands::Man { output } => {
            commands::meta::handle_man(output)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[cfg(feature = "github")]
    #[test]
    fn transfer_parses_positional_arguments() {
        let cli = Cli::try_parse_from([
            "ferry",
            "transfer",
            "org/old",
            "org/new",
            "1 2 3",
            "--delay-ms",
            "250",
        ])
        .unwrap();

        let Commands::Transfer(args) = cli.command else {
            panic!("expected transfer command");
        };
        assert_eq!(args.source, "org/old");
        assert_eq!(args.destination, "org/new");
        assert_eq!(args.issue_numbers, "1 2 3");
        assert_eq!(args.delay_ms, Some(250));
    }

    #[test]
    fn man_accepts_output_directory() {
        let cli = Cli::try_parse_from(["ferry", "man", "-o", "/tmp/ferry-man"]).unwrap();
        match cli.command {
            Commands::Man { output } => assert_eq!(output, Some(PathBuf::from("/tmp/ferry-man"))),
            _ => panic!("expected man command"),
        }
    }
}

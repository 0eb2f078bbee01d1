//! Configuration file support for ferry.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (`FERRY_GITHUB_TOKEN`, `FERRY_GITHUB_API_URL`,
//!    `FERRY_TRANSFER_REQUEST_DELAY_MS`)
//! 3. Config file (./ferry.toml, then ~/.config/ferry/config.toml)
//! 4. Built-in defaults
//!
//! When no token is configured, `GITHUB_TOKEN` and then `INPUT_GITHUB_TOKEN`
//! (the GitHub Actions input form) are used.
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."  # or use FERRY_GITHUB_TOKEN env var
//! api_url = "https://ghe.example.com/api/v3"  # GitHub Enterprise only
//!
//! [transfer]
//! request_delay_ms = 500
//! ```

use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config as ConfigBuilder, ConfigError, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Environment variables and the config keys they set.
const ENV_KEYS: &[(&str, &str)] = &[
    ("FERRY_GITHUB_TOKEN", "github.token"),
    ("FERRY_GITHUB_API_URL", "github.api_url"),
    ("FERRY_TRANSFER_REQUEST_DELAY_MS", "transfer.request_delay_ms"),
];

/// Fallback token variables, in order.
const TOKEN_FALLBACK_VARS: &[&str] = &["GITHUB_TOKEN", "INPUT_GITHUB_TOKEN"];

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// Transfer options.
    pub transfer: TransferConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    pub token: Option<String>,
    /// API root for GitHub Enterprise Server; github.com when unset.
    pub api_url: Option<String>,
}

/// Transfer options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Minimum delay between API requests, in milliseconds.
    pub request_delay_ms: u64,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Apply `FERRY_*` variables found by `lookup` as overrides.
fn with_env_overrides<F>(
    mut builder: config::ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<config::ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in ENV_KEYS {
        if let Some(value) = non_empty(lookup(var)) {
            builder = builder.set_override(*key, value)?;
        }
    }
    Ok(builder)
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/ferry/config.toml)
    /// 3. Local config file (./ferry.toml)
    /// 4. `FERRY_*` environment variables
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("ferry.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./ferry.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let built = with_env_overrides(builder, |var| std::env::var(var).ok())
            .and_then(|builder| builder.build());
        match built {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the GitHub token, falling back to the conventional variables.
    pub fn github_token(&self) -> Option<String> {
        self.github_token_with(|var| std::env::var(var).ok())
    }

    fn github_token_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        non_empty(self.github.token.clone())
            .or_else(|| TOKEN_FALLBACK_VARS.iter().find_map(|var| non_empty(lookup(var))))
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ferry").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

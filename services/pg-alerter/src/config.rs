//! Configuration for the alerter service
//!
//! All configuration comes from environment variables.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AlerterError, Result};

pub const POSTGRES_NAME_ENV_VAR: &str = "POSTGRES_NAME";
pub const POSTGRES_URI_ENV_VAR: &str = "POSTGRES_URI";
pub const ENVIRONMENT_NAME_ENV_VAR: &str = "ENVIRONMENT_NAME";
pub const SLACK_TOKEN_ENV_VAR: &str = "SLACK_TOKEN";
pub const SLACK_CHANNEL_ENV_VAR: &str = "SLACK_CHANNEL";
pub const SLACK_API_URL_ENV_VAR: &str = "SLACK_API_URL";
pub const STATE_FILE_PATH_ENV_VAR: &str = "STATE_FILE_PATH";
pub const NEW_THREAD_MIN_INTERVAL_ENV_VAR: &str = "NEW_THREAD_MIN_INTERVAL";

const DEFAULT_POSTGRES_NAME: &str = "Postgres";
const DEFAULT_ENVIRONMENT_NAME: &str = "Production";
const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";
const DEFAULT_STATE_FILE_PATH: &str = "postgres-alerter-state.yaml";
const DEFAULT_NEW_THREAD_MIN_INTERVAL: &str = "1h";
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Service configuration
#[derive(Clone)]
pub struct Config {
    /// Display name used in alert messages
    pub postgres_name: String,
    pub postgres_uri: String,
    /// Environment label used in alert messages
    pub environment_name: String,
    pub slack_token: String,
    pub slack_channel: String,
    pub slack_api_url: String,
    pub state_file_path: PathBuf,
    /// Minimum age of the last thread before a new one is started
    pub new_thread_min_interval: Duration,
    pub poll_interval: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("postgres_name", &self.postgres_name)
            .field("postgres_uri", &"<redacted>")
            .field("environment_name", &self.environment_name)
            .field("slack_token", &"<redacted>")
            .field("slack_channel", &self.slack_channel)
            .field("slack_api_url", &self.slack_api_url)
            .field("state_file_path", &self.state_file_path)
            .field("new_thread_min_interval", &self.new_thread_min_interval)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// A variable that is present but empty counts as set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let postgres_name = match lookup(POSTGRES_NAME_ENV_VAR) {
            Some(name) => format!("{} (Postgres)", name),
            None => DEFAULT_POSTGRES_NAME.to_string(),
        };

        let postgres_uri = required(&lookup, POSTGRES_URI_ENV_VAR)?;
        let environment_name = lookup(ENVIRONMENT_NAME_ENV_VAR)
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT_NAME.to_string());
        let slack_token = required(&lookup, SLACK_TOKEN_ENV_VAR)?;
        let slack_channel = required(&lookup, SLACK_CHANNEL_ENV_VAR)?;
        let slack_api_url = lookup(SLACK_API_URL_ENV_VAR)
            .unwrap_or_else(|| DEFAULT_SLACK_API_URL.to_string());
        let state_file_path = lookup(STATE_FILE_PATH_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE_PATH));

        let interval_str = lookup(NEW_THREAD_MIN_INTERVAL_ENV_VAR)
            .unwrap_or_else(|| DEFAULT_NEW_THREAD_MIN_INTERVAL.to_string());
        let new_thread_min_interval = humantime::parse_duration(&interval_str).map_err(|e| {
            AlerterError::Config(format!(
                "Failed to parse new thread minimum interval value {}: {}",
                interval_str, e
            ))
        })?;

        Ok(Self {
            postgres_name,
            postgres_uri,
            environment_name,
            slack_token,
            slack_channel,
            slack_api_url,
            state_file_path,
            new_thread_min_interval,
            poll_interval: POLL_INTERVAL,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or(AlerterError::ConfigMissing(key))
}

//! Error types for the alerter service

use std::path::PathBuf;

/// Errors that can occur in the alerter service
#[derive(Debug, thiserror::Error)]
pub enum AlerterError {
    #[error("{0} environment variable is not defined and is required. Please define it")]
    ConfigMissing(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("State file unavailable at {path:?}: {source}")]
    StateUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file at {path:?} could not be parsed: {source}")]
    StateCorrupt {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to store state file at {path:?}: {message}")]
    Persist { path: PathBuf, message: String },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Notification failed: {0}")]
    Notify(String),

    #[error("Probe failed: {0}")]
    Probe(String),
}

impl AlerterError {
    /// Whether this error aborts the process.
    ///
    /// Only a failed probe is recoverable; it is folded into the probe status
    /// as an ordinary "down" observation.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AlerterError::Probe(_))
    }
}

/// Result type alias for alerter operations
pub type Result<T> = std::result::Result<T, AlerterError>;

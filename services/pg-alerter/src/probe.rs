//! Database reachability probe

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};

use crate::error::{AlerterError, Result};

/// Result of a single health probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub is_up: bool,
    /// Failure details, empty when up
    pub errors: Vec<String>,
}

impl Status {
    pub fn up() -> Self {
        Self {
            is_up: true,
            errors: Vec::new(),
        }
    }

    pub fn down(error: impl Into<String>) -> Self {
        Self {
            is_up: false,
            errors: vec![error.into()],
        }
    }
}

/// Trait for checking whether the monitored database is reachable.
///
/// An unreachable target is a normal `Status`, not an error.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Probe: Send + Sync + std::fmt::Debug {
    async fn check(&self) -> Status;
}

/// Probe that opens a fresh Postgres connection and pings it
pub struct PostgresProbe {
    options: PgConnectOptions,
}

impl std::fmt::Debug for PostgresProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresProbe")
            .field("host", &self.options.get_host())
            .field("port", &self.options.get_port())
            .finish()
    }
}

impl PostgresProbe {
    /// Parse the connection URI up front so a malformed URI fails at startup
    pub fn new(uri: &str) -> Result<Self> {
        let options = PgConnectOptions::from_str(uri)
            .map_err(|e| AlerterError::Config(format!("Invalid Postgres URI: {}", e)))?
            .disable_statement_logging();
        tracing::debug!(
            "Created PostgresProbe for {}:{}",
            options.get_host(),
            options.get_port()
        );
        Ok(Self { options })
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = PgConnection::connect_with(&self.options)
            .await
            .map_err(|e| AlerterError::Probe(e.to_string()))?;
        let pinged = conn
            .ping()
            .await
            .map_err(|e| AlerterError::Probe(e.to_string()));
        if let Err(e) = conn.close().await {
            tracing::debug!("Error closing probe connection: {}", e);
        }
        pinged
    }
}

#[async_trait]
impl Probe for PostgresProbe {
    async fn check(&self) -> Status {
        match self.ping().await {
            Ok(()) => Status::up(),
            Err(e) => Status::down(e.to_string()),
        }
    }
}

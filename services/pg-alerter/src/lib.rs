//! pg-alerter - Postgres reachability monitor
//!
//! Pings a Postgres database every second and posts to Slack when it goes
//! down or comes back up, grouping bursts of alerts into one thread.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod notifier;
pub mod probe;
pub mod slack;
pub mod state;
pub mod thread;
pub mod transition;

pub use config::Config;
pub use error::{AlerterError, Result};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::ReqwestHttpClient;
use crate::probe::PostgresProbe;
use crate::slack::SlackNotifier;

/// Run the alerter with the given configuration until a shutdown signal
pub async fn run(config: Config) -> Result<()> {
    state::ensure_present(&config.state_file_path)?;

    let probe = Arc::new(PostgresProbe::new(&config.postgres_uri)?);
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::default());
    let notifier = Arc::new(SlackNotifier::new(&config, http));
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    let engine = Engine::new(probe, notifier, &config, cancel);

    tracing::info!(
        "Alerter started for {} in {} environment",
        config.postgres_name,
        config.environment_name
    );
    engine.run().await?;
    tracing::info!("Alerter stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

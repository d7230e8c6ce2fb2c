//! pg-alerter CLI
//!
//! All configuration is read from environment variables.

use clap::Parser;
use pg_alerter::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pg-alerter")]
#[command(about = "Alerts a Slack channel when a Postgres database goes down or comes back up")]
#[command(version)]
struct Args {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().map_err(|e| {
        tracing::error!(
            "Error occurred while getting configuration from environment variables: {}",
            e
        );
        e
    })?;
    tracing::debug!("Loaded configuration: {:?}", config);

    if let Err(e) = pg_alerter::run(config).await {
        tracing::error!("Alerter stopped with an unrecoverable error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

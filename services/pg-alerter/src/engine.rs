//! Engine: ties the probe, state store, alert policy and notifier together

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::notifier::Notifier;
use crate::probe::{Probe, Status};
use crate::state::{self, PersistedState};
use crate::thread::should_start_new_thread;
use crate::transition::Transition;

/// How an alert was delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// A new thread was started with the given root identifier
    NewThread(String),
    /// A reply was posted under the given existing thread
    Reply(String),
}

/// Outcome of one evaluation
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub status: Status,
    pub transition: Option<Transition>,
    pub delivery: Option<Delivery>,
    /// The state written back to disk
    pub state: PersistedState,
}

/// The engine evaluates one probe result per tick
pub struct Engine {
    probe: Arc<dyn Probe>,
    notifier: Arc<dyn Notifier>,
    resource_name: String,
    environment_name: String,
    channel: String,
    state_file_path: PathBuf,
    new_thread_min_interval: Duration,
    poll_interval: Duration,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        probe: Arc<dyn Probe>,
        notifier: Arc<dyn Notifier>,
        config: &Config,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            probe,
            notifier,
            resource_name: config.postgres_name.clone(),
            environment_name: config.environment_name.clone(),
            channel: config.slack_channel.clone(),
            state_file_path: config.state_file_path.clone(),
            new_thread_min_interval: config.new_thread_min_interval,
            poll_interval: config.poll_interval,
            cancel,
        }
    }

    /// Tick until cancelled or until an evaluation fails fatally.
    ///
    /// Cancellation also abandons an evaluation that is in flight.
    pub async fn run(&self) -> crate::Result<()> {
        let mut ticker =
            tokio::time::interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    return Ok(());
                }
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("Cancelled during evaluation, state may not be persisted");
                    return Ok(());
                }
                result = self.evaluate(SystemTime::now()) => {
                    if let Err(e) = result {
                        if e.is_fatal() {
                            return Err(e);
                        }
                        tracing::warn!("Evaluation failed: {}", e);
                    }
                }
            }
        }
    }

    /// Probe once, alert on an edge and persist the new state
    pub async fn evaluate(&self, now: SystemTime) -> crate::Result<Evaluation> {
        let status = self.probe.check().await;
        for error in &status.errors {
            tracing::warn!("{} is unreachable: {}", self.resource_name, error);
        }

        let previous = state::load(&self.state_file_path)?;

        tracing::debug!(
            "Poll '{}': up={} -> up={}",
            self.resource_name,
            previous.was_up,
            status.is_up
        );

        let transition = Transition::detect(previous.was_up, status.is_up);
        let mut last_thread_id = previous.last_thread_id;
        let mut delivery = None;

        if let Some(transition) = transition {
            let message = transition.message(&self.resource_name, &self.environment_name);

            if should_start_new_thread(&last_thread_id, now, self.new_thread_min_interval) {
                last_thread_id = self.notifier.post_new(&self.channel, &message).await?;
                tracing::info!(
                    "Alert ({}) sent in new thread {}",
                    transition,
                    last_thread_id
                );
                delivery = Some(Delivery::NewThread(last_thread_id.clone()));
            } else {
                // The reply's own identifier is not kept; the root stays the thread id
                self.notifier
                    .post_reply(&self.channel, &message, &last_thread_id)
                    .await?;
                tracing::info!(
                    "Alert ({}) sent as reply in thread {}",
                    transition,
                    last_thread_id
                );
                delivery = Some(Delivery::Reply(last_thread_id.clone()));
            }
        }

        let next = PersistedState {
            was_up: status.is_up,
            last_thread_id,
        };
        state::save(&self.state_file_path, &next)?;

        Ok(Evaluation {
            status,
            transition,
            delivery,
            state: next,
        })
    }
}

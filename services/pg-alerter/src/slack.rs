//! Slack Web API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Relevant part of a `chat.postMessage` response
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Slack notification sender
pub struct SlackNotifier {
    token: String,
    api_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for SlackNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackNotifier")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl SlackNotifier {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created SlackNotifier for {}", config.slack_api_url);
        Self {
            token: config.slack_token.clone(),
            api_url: config.slack_api_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    async fn post_message(&self, body: serde_json::Value) -> crate::Result<PostMessageResponse> {
        let url = format!("{}/chat.postMessage", self.api_url);
        let response = self.http.post_json(&url, &self.token, &body).await?;

        if response.status != 200 {
            return Err(crate::AlerterError::Notify(format!(
                "Slack API returned status {}: {}",
                response.status, response.body
            )));
        }

        let parsed: PostMessageResponse = serde_json::from_str(&response.body).map_err(|e| {
            crate::AlerterError::Notify(format!("Unexpected Slack API response: {}", e))
        })?;

        if !parsed.ok {
            return Err(crate::AlerterError::Notify(format!(
                "Slack API rejected message: {}",
                parsed.error.as_deref().unwrap_or("unknown error")
            )));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn post_new(&self, channel: &str, text: &str) -> crate::Result<String> {
        tracing::debug!("Posting new Slack message to '{}'", channel);
        let response = self
            .post_message(json!({
                "channel": channel,
                "text": text,
            }))
            .await?;

        match response.ts {
            Some(ts) if !ts.is_empty() => {
                tracing::debug!("Slack message posted with ts {}", ts);
                Ok(ts)
            }
            _ => Err(crate::AlerterError::Notify(
                "Slack API response did not include a message timestamp".to_string(),
            )),
        }
    }

    async fn post_reply(&self, channel: &str, text: &str, thread_id: &str) -> crate::Result<()> {
        tracing::debug!("Posting Slack reply to '{}' in thread {}", channel, thread_id);
        self.post_message(json!({
            "channel": channel,
            "text": text,
            "thread_ts": thread_id,
        }))
        .await?;
        Ok(())
    }
}

//! Notifier trait for sending threaded chat alerts

use async_trait::async_trait;

/// Trait for posting alerts to a chat channel
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Post a new top-level message, returning its thread identifier
    async fn post_new(&self, channel: &str, text: &str) -> crate::Result<String>;

    /// Post a reply under an existing thread
    async fn post_reply(&self, channel: &str, text: &str, thread_id: &str) -> crate::Result<()>;
}

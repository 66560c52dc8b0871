//! notify
//!
//! Chat notification of finished release notes.
//!
//! # Design
//!
//! A notifier posts one markdown text block. Delivery is fire-and-forget:
//! the HTTP status of the webhook response is logged but never treated as
//! a failure. Only transport errors surface as [`NotifyError`], and the
//! pipeline logs those and carries on.
//!
//! # Modules
//!
//! - [`slack`]: Slack incoming-webhook implementation
//! - [`mock`]: Recording implementation for tests

pub mod mock;
pub mod slack;

pub use slack::SlackWebhook;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from posting a notification.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// The request could not be sent.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// Something that can receive release notes as a chat message.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Get the notifier name (e.g., "slack").
    fn name(&self) -> &'static str;

    /// Post `text` as a single markdown block.
    async fn post(&self, text: &str) -> Result<(), NotifyError>;
}

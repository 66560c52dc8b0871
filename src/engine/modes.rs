//! engine::modes
//!
//! Render modes and chat delivery.
//!
//! # Modes
//!
//! | Mode | Priority table | Order | Writes |
//! |------|----------------|-------|--------|
//! | `with-key-dual-file` | [`PriorityTable::DUAL_FILE`] | descending | two notes files, truncated |
//! | `without-key-single-file-with-chat` | [`PriorityTable::CHAT`] | ascending | changelog section, appended |
//!
//! Only the chat mode may post to a webhook. Asking for a post in the other
//! mode, or without a webhook URL, is refused up front rather than skipped.

use thiserror::Error;

use super::fetch::TicketOrder;
use crate::core::types::PriorityTable;

/// Errors from mode resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    /// Chat posting requested in a mode that never posts.
    #[error("--slack is only supported with --mode {supported}, not {requested}")]
    ChatNotSupported {
        requested: &'static str,
        supported: &'static str,
    },

    /// Chat posting requested without a destination.
    #[error("--slack requires a webhook URL (--slack-webhook-url, SLACK_WEBHOOK_URL or slack.webhook_url)")]
    MissingWebhook,
}

/// Which notes are produced and where they go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// With-key and without-key notes, each written to its own file.
    #[default]
    WithKeyDualFile,
    /// Without-key notes appended to a changelog, optionally posted to chat.
    WithoutKeySingleFileWithChat,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::WithKeyDualFile => "with-key-dual-file",
            RenderMode::WithoutKeySingleFileWithChat => "without-key-single-file-with-chat",
        }
    }

    pub fn priorities(self) -> PriorityTable {
        match self {
            RenderMode::WithKeyDualFile => PriorityTable::DUAL_FILE,
            RenderMode::WithoutKeySingleFileWithChat => PriorityTable::CHAT,
        }
    }

    pub fn ticket_order(self) -> TicketOrder {
        match self {
            RenderMode::WithKeyDualFile => TicketOrder::Descending,
            RenderMode::WithoutKeySingleFileWithChat => TicketOrder::Ascending,
        }
    }

    pub fn supports_chat(self) -> bool {
        self == RenderMode::WithoutKeySingleFileWithChat
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the run posts its notes to chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatDelivery {
    Off,
    Webhook { url: String },
}

impl ChatDelivery {
    /// Resolve delivery from the `--slack` flag and the configured webhook.
    pub fn resolve(
        mode: RenderMode,
        requested: bool,
        webhook_url: Option<String>,
    ) -> Result<Self, ModeError> {
        if !requested {
            return Ok(ChatDelivery::Off);
        }
        if !mode.supports_chat() {
            return Err(ModeError::ChatNotSupported {
                requested: mode.as_str(),
                supported: RenderMode::WithoutKeySingleFileWithChat.as_str(),
            });
        }
        match webhook_url {
            Some(url) if !url.trim().is_empty() => Ok(ChatDelivery::Webhook { url }),
            _ => Err(ModeError::MissingWebhook),
        }
    }
}

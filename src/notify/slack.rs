//! notify::slack
//!
//! Slack incoming-webhook notifier.
//!
//! The message is sent as `section` blocks with `mrkdwn` text, plus a plain
//! `text` fallback for clients that do not render blocks. Slack rejects a
//! section whose text exceeds [`SECTION_TEXT_LIMIT`] characters, so longer
//! notes are split across several sections at line boundaries.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::{Notifier, NotifyError};

/// Maximum characters Slack accepts in one section block's text.
pub const SECTION_TEXT_LIMIT: usize = 3000;

/// Posts to a Slack incoming webhook.
pub struct SlackWebhook {
    client: Client,
    url: String,
}

// Custom Debug: the webhook URL is a credential
impl std::fmt::Debug for SlackWebhook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackWebhook").finish_non_exhaustive()
    }
}

impl SlackWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

/// Build the webhook payload for `text`.
pub fn payload(text: &str) -> WebhookPayload<'_> {
    let blocks = section_chunks(text, SECTION_TEXT_LIMIT)
        .into_iter()
        .map(|chunk| Block {
            kind: "section",
            text: BlockText {
                kind: "mrkdwn",
                text: chunk,
            },
        })
        .collect();
    WebhookPayload { text, blocks }
}

/// Split `text` into pieces of at most `limit` characters.
///
/// Breaks fall after a newline where possible; a single line longer than
/// `limit` is cut at a character boundary.
fn section_chunks(text: &str, limit: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while rest.chars().count() > limit {
        // Byte offset just past the `limit`-th character.
        let hard = rest
            .char_indices()
            .nth(limit)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let cut = match rest[..hard].rfind('\n') {
            Some(newline) if newline > 0 => newline + 1,
            _ => hard,
        };
        chunks.push(&rest[..cut]);
        rest = &rest[cut..];
    }
    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(rest);
    }
    chunks
}

#[async_trait]
impl Notifier for SlackWebhook {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn post(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&payload(text))
            .send()
            .await
            .map_err(|e| NotifyError::NetworkError(e.to_string()))?;

        // Status is logged only.
        debug!(status = response.status().as_u16(), "slack webhook responded");
        Ok(())
    }
}

// =============================================================================
// Slack API Types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    text: &'a str,
    blocks: Vec<Block<'a>>,
}

#[derive(Debug, Serialize)]
struct Block<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: BlockText<'a>,
}

#[derive(Debug, Serialize)]
struct BlockText<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

//! notify::mock
//!
//! Recording notifier for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{Notifier, NotifyError};

/// Keeps every posted message in memory.
///
/// Clones share the same message list, so a test can hand one clone to the
/// pipeline and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    fail: Option<NotifyError>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every post fail with `err` (after recording the message).
    pub fn failing(err: NotifyError) -> Self {
        Self {
            messages: Arc::default(),
            fail: Some(err),
        }
    }

    /// Messages posted so far.
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn post(&self, text: &str) -> Result<(), NotifyError> {
        match self.messages.lock() {
            Ok(mut guard) => guard.push(text.to_string()),
            Err(poisoned) => poisoned.into_inner().push(text.to_string()),
        }
        match &self.fail {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

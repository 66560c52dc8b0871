//! tracker::mock
//!
//! Mock tracker implementation for deterministic testing.
//!
//! # Design
//!
//! The mock tracker stores issues in memory, answers epic searches from a
//! per-release table, and records every call so tests can assert on the
//! exact sequence of remote lookups.
//!
//! # Example
//!
//! ```
//! use fixnotes::tracker::mock::MockTracker;
//! use fixnotes::tracker::{IssueRecord, IssueTracker};
//!
//! # tokio_test_block_on(async {
//! let tracker = MockTracker::new().with_issue(IssueRecord {
//!     key: "DEV-1".to_string(),
//!     issue_type: "Task".to_string(),
//!     summary: "Do it".to_string(),
//!     description: None,
//!     fix_versions: vec!["2.3".to_string()],
//! });
//!
//! let issue = tracker.get_issue("DEV-1").await.unwrap();
//! assert_eq!(issue.summary, "Do it");
//! assert!(tracker.get_issue("DEV-2").await.is_err());
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{IssueRecord, IssueTracker, TrackerError};

/// Mock tracker for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockTracker {
    inner: Arc<Mutex<MockTrackerInner>>,
}

#[derive(Debug, Default)]
struct MockTrackerInner {
    issues: HashMap<String, IssueRecord>,
    epics: HashMap<String, Vec<IssueRecord>>,
    fail_on: Vec<FailOn>,
    operations: Vec<MockOperation>,
}

/// Configuration for which call should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail `get_issue` for this key.
    GetIssue(String, TrackerError),
    /// Fail `search_epics` for this fix version.
    SearchEpics(String, TrackerError),
}

/// Recorded call for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    GetIssue { key: String },
    SearchEpics { fix_version: String },
}

impl MockTracker {
    /// Create an empty mock tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue that `get_issue` will return.
    pub fn with_issue(self, issue: IssueRecord) -> Self {
        {
            let mut inner = self.lock();
            inner.issues.insert(issue.key.clone(), issue);
        }
        self
    }

    /// Add an epic that `search_epics(fix_version)` will return.
    pub fn with_epic(self, fix_version: &str, epic: IssueRecord) -> Self {
        {
            let mut inner = self.lock();
            inner
                .epics
                .entry(fix_version.to_string())
                .or_default()
                .push(epic);
        }
        self
    }

    /// Configure a call to fail.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.lock();
            inner.fail_on.push(fail_on);
        }
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockTrackerInner> {
        // A poisoned lock only means another test thread panicked.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_issue(&self, key: &str) -> Result<IssueRecord, TrackerError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::GetIssue {
            key: key.to_string(),
        });

        for fail in &inner.fail_on {
            if let FailOn::GetIssue(k, err) = fail {
                if k == key {
                    return Err(err.clone());
                }
            }
        }

        inner
            .issues
            .get(key)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(key.to_string()))
    }

    async fn search_epics(&self, fix_version: &str) -> Result<Vec<IssueRecord>, TrackerError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::SearchEpics {
            fix_version: fix_version.to_string(),
        });

        for fail in &inner.fail_on {
            if let FailOn::SearchEpics(v, err) = fail {
                if v == fix_version {
                    return Err(err.clone());
                }
            }
        }

        Ok(inner.epics.get(fix_version).cloned().unwrap_or_default())
    }
}

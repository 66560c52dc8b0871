//! tracker::traits
//!
//! IssueTracker trait definition for reading issue metadata.
//!
//! # Design
//!
//! The `IssueTracker` trait is async because lookups involve network I/O.
//! The trait is read-only: the notes pipeline never writes to the tracker.
//! Callers issue requests one at a time; implementations need not support
//! concurrent use beyond `Send + Sync`.
//!
//! # Example
//!
//! ```ignore
//! use fixnotes::tracker::{IssueTracker, TrackerError};
//!
//! async fn summary_of(tracker: &dyn IssueTracker) -> Result<String, TrackerError> {
//!     let issue = tracker.get_issue("DEV-123").await?;
//!     Ok(issue.summary)
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// Errors from issue-tracker operations.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// Authentication failed (missing, invalid or expired token).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested issue was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// The response body could not be decoded into an issue record.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// An issue as returned by the tracker, before any domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    /// Issue key (e.g. `DEV-123`)
    pub key: String,
    /// Issue type name as spelled by the tracker
    pub issue_type: String,
    /// One-line summary
    pub summary: String,
    /// Free-text description, if any
    pub description: Option<String>,
    /// Declared fix-version names, in tracker order
    pub fix_versions: Vec<String>,
}

/// Read-only access to an issue tracker.
///
/// # Error Handling
///
/// All methods return `Result<T, TrackerError>`. The notes pipeline treats
/// a failed `get_issue` as a skipped ticket and a failed `search_epics` as
/// the end of epic enrichment; neither is retried.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Get the tracker name (e.g., "jira").
    fn name(&self) -> &'static str;

    /// Fetch a single issue by key.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the key does not exist
    /// - `AuthFailed` if the token is rejected
    /// - `Malformed` if a required field is missing from the response
    async fn get_issue(&self, key: &str) -> Result<IssueRecord, TrackerError>;

    /// Fetch every epic declared against `fix_version`.
    ///
    /// The project the search is scoped to is implementation configuration.
    async fn search_epics(&self, fix_version: &str) -> Result<Vec<IssueRecord>, TrackerError>;
}

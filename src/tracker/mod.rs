//! tracker
//!
//! Abstraction for the remote issue tracker (Jira).
//!
//! # Architecture
//!
//! The `IssueTracker` trait defines the read-only interface the notes
//! pipeline needs: one lookup by key and one epic search per release. The
//! engine only ever sees `&dyn IssueTracker`, so tests substitute
//! [`mock::MockTracker`] for the network.
//!
//! Tracker failures never corrupt the run: a failed lookup drops one
//! ticket, a failed search ends epic enrichment.
//!
//! # Modules
//!
//! - `traits`: Core `IssueTracker` trait, `IssueRecord` and `TrackerError`
//! - [`jira`]: Jira REST implementation
//! - [`mock`]: In-memory implementation for deterministic testing

pub mod jira;
pub mod mock;
mod traits;

pub use jira::JiraTracker;
pub use traits::*;

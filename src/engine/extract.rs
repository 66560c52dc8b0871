//! engine::extract
//!
//! Commit extraction: turn the requested range into commit subjects.
//!
//! # Range resolution
//!
//! - Between two refs: if `from` is not a tag, both refs are looked up under
//!   the remote-tracking namespace (`origin/<ref>`), as a CI checkout usually
//!   has no local branches.
//! - Since a tag: only `from` is resolved that way; the end is HEAD.
//!
//! Any resolution failure is fatal for the run.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::core::types::Oid;
use crate::git::{Git, GitError};

/// Which commits to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRange {
    /// Commits after `from` up to and including `to`.
    Between { from: String, to: String },
    /// Commits after `from` up to and including HEAD.
    SinceTag { from: String },
}

impl CommitRange {
    /// Build a range from the CLI's optional end ref.
    pub fn new(from: impl Into<String>, to: Option<String>) -> Self {
        match to {
            Some(to) => CommitRange::Between {
                from: from.into(),
                to,
            },
            None => CommitRange::SinceTag { from: from.into() },
        }
    }

    pub fn from_ref(&self) -> &str {
        match self {
            CommitRange::Between { from, .. } | CommitRange::SinceTag { from } => from,
        }
    }

    /// The end ref, or `None` for HEAD.
    pub fn to_ref(&self) -> Option<&str> {
        match self {
            CommitRange::Between { to, .. } => Some(to),
            CommitRange::SinceTag { .. } => None,
        }
    }

    /// Version the notes describe: the end ref, or the start tag when
    /// reading up to HEAD.
    pub fn version_label(&self) -> &str {
        self.to_ref().unwrap_or_else(|| self.from_ref())
    }
}

impl std::fmt::Display for CommitRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitRange::Between { from, to } => write!(f, "{}..{}", from, to),
            CommitRange::SinceTag { from } => write!(f, "{}..HEAD", from),
        }
    }
}

/// Resolved endpoints and the unique subjects between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSpan {
    pub from: Oid,
    pub to: Oid,
    /// Unique subjects, first occurrence order
    pub subjects: Vec<String>,
}

/// Resolve `range` and list the unique commit subjects in it.
pub fn collect_subjects(git: &Git, range: &CommitRange, remote: &str) -> Result<CommitSpan, GitError> {
    let from_ref = range.from_ref();
    let use_remote = !git.tag_exists(from_ref)?;
    let qualify = |name: &str| {
        if use_remote {
            format!("{}/{}", remote, name)
        } else {
            name.to_string()
        }
    };

    let from_spec = qualify(from_ref);
    let from = git.resolve(&from_spec)?;
    let to = match range.to_ref() {
        Some(to_ref) => git.resolve(&qualify(to_ref))?,
        None => git.head_oid()?,
    };
    info!(
        range = %range,
        from = from.short(7),
        to = to.short(7),
        remote_refs = use_remote,
        "resolved commit range"
    );

    let all = git.commit_subjects(&from, &to)?;
    let total = all.len();
    let subjects = dedup_subjects(all);
    debug!(total, unique = subjects.len(), "listed commit subjects");

    Ok(CommitSpan { from, to, subjects })
}

/// Drop exact duplicate subjects, keeping the first occurrence.
pub fn dedup_subjects(subjects: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    subjects
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

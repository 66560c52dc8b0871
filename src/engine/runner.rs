//! engine::runner
//!
//! The single entry point for a release-notes run.
//!
//! # Lifecycle
//!
//! ```text
//! Extract -> Scan -> Fetch -> Group -> Enrich -> Render -> Publish
//! ```
//!
//! Only extraction and file writes can fail the run. Ticket lookups, epic
//! searches and chat posts degrade: their failures are logged, recorded in
//! the [`RunReport`], and the run continues with what it has.
//!
//! CI outputs are collected into the report, not printed; the caller picks
//! the protocol and destination.
//!
//! # Example
//!
//! ```ignore
//! use fixnotes::engine::{Pipeline, RunConfig};
//!
//! let report = Pipeline::new(&git, &tracker)
//!     .with_notifier(&slack)
//!     .run(&config)
//!     .await?;
//! report.outputs.emit(protocol, &mut std::io::stdout(), None)?;
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use super::extract::{collect_subjects, CommitRange, CommitSpan};
use super::fetch::{enrich_epics, fetch_tickets, EnrichOutcome, FetchFailure};
use super::modes::RenderMode;
use crate::core::release::ReleaseMap;
use crate::core::render::{render_notes, EmptinessCheck, MarkerCheck, ReleaseHeader, TicketFormat};
use crate::core::scan::scan_subjects;
use crate::core::types::TicketKey;
use crate::git::{Git, GitError};
use crate::notify::Notifier;
use crate::sink::{self, CiOutputs, SinkError};
use crate::tracker::IssueTracker;

/// Output names read by the CI workflow.
pub mod output_names {
    pub const CHANGE_LOG_FILE: &str = "change_log_file";
    pub const CHANGE_LOG_FILE_WITHOUT_ISSUES: &str = "change_log_file_without_issues";
    pub const EMPTY: &str = "empty";
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The commit range could not be read.
    #[error("git: {0}")]
    Git(#[from] GitError),

    /// Notes could not be written.
    #[error("{0}")]
    Sink(#[from] SinkError),
}

/// Where notes files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub notes_file: String,
    pub notes_without_keys_file: String,
    pub changelog_file: String,
}

impl OutputPaths {
    pub fn notes_path(&self) -> PathBuf {
        self.dir.join(&self.notes_file)
    }

    pub fn notes_without_keys_path(&self) -> PathBuf {
        self.dir.join(&self.notes_without_keys_file)
    }

    pub fn changelog_path(&self) -> PathBuf {
        self.dir.join(&self.changelog_file)
    }
}

/// Everything a run needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub range: CommitRange,
    pub mode: RenderMode,
    /// Remote used when `from` is not a tag
    pub remote: String,
    pub outputs: OutputPaths,
    /// Display name used in the chat header
    pub repo_name: Option<String>,
    /// Date printed in changelog and chat headers
    pub release_date: NaiveDate,
}

/// Notes rendered in both formats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedNotes {
    pub with_keys: String,
    pub without_keys: String,
}

/// What happened to the chat post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// No notifier, or a mode that never posts
    Skipped,
    Posted,
    /// Transport failure; the run still succeeded
    Failed(String),
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub span: CommitSpan,
    pub keys: BTreeSet<TicketKey>,
    pub failures: Vec<FetchFailure>,
    pub enrichment: EnrichOutcome,
    /// Release names in grouping order
    pub releases: Vec<String>,
    pub notes: RenderedNotes,
    pub empty: bool,
    pub files: Vec<PathBuf>,
    pub chat: ChatOutcome,
    pub outputs: CiOutputs,
}

/// Runs the pipeline against injected collaborators.
pub struct Pipeline<'a> {
    git: &'a Git,
    tracker: &'a dyn IssueTracker,
    notifier: Option<&'a dyn Notifier>,
    empty_check: Box<dyn EmptinessCheck + 'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(git: &'a Git, tracker: &'a dyn IssueTracker) -> Self {
        Self {
            git,
            tracker,
            notifier: None,
            empty_check: Box::new(MarkerCheck::default()),
        }
    }

    /// Post chat-mode notes through `notifier`.
    pub fn with_notifier(mut self, notifier: &'a dyn Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Replace the stock "dev" marker check.
    pub fn with_empty_check(mut self, check: impl EmptinessCheck + 'a) -> Self {
        self.empty_check = Box::new(check);
        self
    }

    pub async fn run(&self, config: &RunConfig) -> Result<RunReport, RunError> {
        let priorities = config.mode.priorities();
        info!(
            mode = %config.mode,
            range = %config.range,
            tracker = self.tracker.name(),
            priorities = priorities.name,
            "generating release notes"
        );

        let span = collect_subjects(self.git, &config.range, &config.remote)?;
        let keys = scan_subjects(&span.subjects);
        info!(commits = span.subjects.len(), tickets = keys.len(), "scanned commit subjects");

        let fetched = fetch_tickets(self.tracker, &keys, &priorities, config.mode.ticket_order()).await;
        let mut releases = ReleaseMap::from_tickets(fetched.tickets);
        let enrichment = enrich_epics(self.tracker, &mut releases, &priorities).await;

        let notes = RenderedNotes {
            with_keys: render_notes(&releases, TicketFormat::WithKey, &priorities),
            without_keys: render_notes(&releases, TicketFormat::WithoutKey, &priorities),
        };
        let empty = self.empty_check.is_empty(&notes.with_keys);

        let mut outputs = CiOutputs::new();
        let mut files = Vec::new();
        let chat = match config.mode {
            RenderMode::WithKeyDualFile => {
                let notes_path = config.outputs.notes_path();
                let without_path = config.outputs.notes_without_keys_path();
                write_file(&notes_path, &notes.with_keys, false)?;
                write_file(&without_path, &notes.without_keys, false)?;

                outputs.set(output_names::CHANGE_LOG_FILE, path_value(&notes_path));
                outputs.set(
                    output_names::CHANGE_LOG_FILE_WITHOUT_ISSUES,
                    path_value(&without_path),
                );
                files.push(notes_path);
                files.push(without_path);
                ChatOutcome::Skipped
            }
            RenderMode::WithoutKeySingleFileWithChat => {
                let header = ReleaseHeader::new(
                    config.repo_name.clone(),
                    config.range.version_label(),
                    config.release_date,
                );
                let changelog = config.outputs.changelog_path();
                write_file(&changelog, &header.changelog_section(&notes.without_keys), true)?;

                outputs.set(output_names::CHANGE_LOG_FILE, path_value(&changelog));
                files.push(changelog);
                self.post_chat(&header.chat_message(&notes.without_keys)).await
            }
        };
        outputs.set(output_names::EMPTY, empty.to_string());

        Ok(RunReport {
            span,
            keys,
            failures: fetched.failures,
            enrichment,
            releases: releases.names(),
            notes,
            empty,
            files,
            chat,
            outputs,
        })
    }

    async fn post_chat(&self, message: &str) -> ChatOutcome {
        let Some(notifier) = self.notifier else {
            return ChatOutcome::Skipped;
        };
        match notifier.post(message).await {
            Ok(()) => {
                info!(notifier = notifier.name(), "posted release notes");
                ChatOutcome::Posted
            }
            Err(e) => {
                warn!(notifier = notifier.name(), error = %e, "failed to post release notes");
                ChatOutcome::Failed(e.to_string())
            }
        }
    }
}

fn write_file(path: &Path, text: &str, append: bool) -> Result<(), SinkError> {
    if append {
        sink::append(path, text)?;
    } else {
        sink::write_truncate(path, text)?;
    }
    info!(path = %path.display(), bytes = text.len(), append, "wrote notes");
    Ok(())
}

fn path_value(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(dir: &str) -> OutputPaths {
        OutputPaths {
            dir: PathBuf::from(dir),
            notes_file: "release_notes.txt".into(),
            notes_without_keys_file: "release_notes_without_issues.txt".into(),
            changelog_file: "CHANGELOG.md".into(),
        }
    }

    #[test]
    fn output_paths_join_dir() {
        let p = paths("/tmp");
        assert_eq!(p.notes_path(), PathBuf::from("/tmp/release_notes.txt"));
        assert_eq!(
            p.notes_without_keys_path(),
            PathBuf::from("/tmp/release_notes_without_issues.txt")
        );
        assert_eq!(p.changelog_path(), PathBuf::from("/tmp/CHANGELOG.md"));
    }

    #[test]
    fn run_error_displays_source() {
        let err: RunError = GitError::RefNotFound {
            refname: "origin/v9".into(),
        }
        .into();
        assert!(err.to_string().contains("origin/v9"));
    }
}

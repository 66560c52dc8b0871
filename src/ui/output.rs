//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! stdout is reserved for CI protocol lines and, with `--print`, the notes
//! themselves. Everything meant for a human goes to stderr and respects the
//! quiet flag.

use std::fmt::Display;

use crate::engine::{ChatOutcome, RunReport};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - progress and summary
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Default log filter when `FIXNOTES_LOG` is unset.
    pub fn log_filter(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "fixnotes=info,warn",
            Verbosity::Debug => "fixnotes=debug,info",
        }
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-paragraph human summary of a run.
pub fn format_summary(report: &RunReport) -> String {
    let mut lines = vec![format!(
        "{} commits, {} tickets referenced, {} fetched, {} releases",
        report.span.subjects.len(),
        report.keys.len(),
        report.keys.len().saturating_sub(report.failures.len()),
        report.releases.len(),
    )];

    if !report.failures.is_empty() {
        let skipped: Vec<String> = report
            .failures
            .iter()
            .map(|f| format!("{} ({})", f.key, f.error))
            .collect();
        lines.push(format!("skipped tickets:\n{}", format_list(&skipped, "  ")));
    }
    if let Some(err) = &report.enrichment.error {
        lines.push(format!("epic enrichment incomplete: {}", err));
    }
    match &report.chat {
        ChatOutcome::Skipped => {}
        ChatOutcome::Posted => lines.push("posted to chat".to_string()),
        ChatOutcome::Failed(err) => lines.push(format!("chat post failed: {}", err)),
    }
    let files: Vec<String> = report.files.iter().map(|p| p.display().to_string()).collect();
    if !files.is_empty() {
        lines.push(format!("wrote:\n{}", format_list(&files, "  ")));
    }
    lines.join("\n")
}

/// Print the run summary (respects quiet mode).
pub fn summary(report: &RunReport, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{}", format_summary(report));
    }
}

//! fixnotes - release notes from git history and Jira fix versions
//!
//! fixnotes reads the commit subjects between two refs, picks the first
//! ticket key out of each, looks the tickets up in Jira, groups them by fix
//! version, adds each release's epics, and renders the result as plain-text
//! notes for files, a changelog, and chat.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Extract → Scan → Fetch → Group → Enrich → Render → Publish
//! - [`core`] - Domain types, scanner, grouping, rendering and configuration
//! - [`git`] - Single interface for all Git reads
//! - [`tracker`] - Abstraction for issue trackers (Jira v1)
//! - [`notify`] - Chat webhook delivery
//! - [`sink`] - Notes files and CI output values
//! - [`ui`] - Verbosity, summaries and log setup
//!
//! # Invariants
//!
//! 1. The repository is only ever read, never written
//! 2. Tracker requests are sequential
//! 3. A missing ticket never aborts a run; an unresolvable ref always does
//! 4. The same commits and tracker answers always render the same notes

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod notify;
pub mod sink;
pub mod tracker;
pub mod ui;

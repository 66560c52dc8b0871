//! core
//!
//! Core domain types and pure transformations for fixnotes.
//!
//! # Modules
//!
//! - [`types`] - Strong types: TicketKey, Oid, IssueType, PriorityTable
//! - [`ticket`] - The immutable Ticket entity and its ordering
//! - [`release`] - Fix-version buckets and the insertion-ordered release map
//! - [`scan`] - Ticket reference extraction from commit subjects
//! - [`render`] - Notes text, release headers and the emptiness check
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at construction time
//! - Nothing here performs I/O except config loading
//! - Rendering is deterministic for a given release map

pub mod config;
pub mod release;
pub mod render;
pub mod scan;
pub mod ticket;
pub mod types;

//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. No other module imports
//! `git2`, and nothing shells out to the git CLI.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Tag lookup (`git tag -l` semantics)
//! - Revision resolution to commit ids
//! - Commit subjects in a range
//!
//! # Invariants
//!
//! - All operations are read-only
//! - All operations return strong types (Oid)

mod interface;

pub use interface::{Git, GitError};

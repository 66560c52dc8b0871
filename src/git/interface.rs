//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to the repository. The notes
//! pipeline only reads: it checks for tags, resolves revisions to commits,
//! and lists commit subjects in a range.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RefNotFound`]: Requested revision does not exist
//! - [`GitError::InvalidOid`]: Object id could not be parsed
//! - [`GitError::Internal`]: Anything else git2 reports
//!
//! # Example
//!
//! ```ignore
//! use fixnotes::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let from = git.resolve("v1.0.0")?;
//! let to = git.head_oid()?;
//! for subject in git.commit_subjects(&from, &to)? {
//!     println!("{}", subject);
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{Oid, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Requested revision does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The revision that was not found
        refname: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with the revision being looked up.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound | git2::ErrorCode::UnbornBranch => GitError::RefNotFound {
                refname: context.to_string(),
            },
            git2::ErrorCode::InvalidSpec | git2::ErrorCode::Ambiguous => GitError::RefNotFound {
                refname: format!("{} ({})", context, err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        GitError::InvalidOid {
            oid: err.to_string(),
        }
    }
}

/// The Git interface.
///
/// Wraps a `git2::Repository`. Read-only from the point of view of this
/// crate.
pub struct Git {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("git_dir", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open a repository at or above `path`.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    /// Working directory root, if the repository has one.
    pub fn work_dir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Check whether any tag matches `pattern` (same globbing as `git tag -l`).
    pub fn tag_exists(&self, pattern: &str) -> Result<bool, GitError> {
        let names = self
            .repo
            .tag_names(Some(pattern))
            .map_err(|e| GitError::from_git2(e, pattern))?;
        Ok(!names.is_empty())
    }

    // =========================================================================
    // Revision Resolution
    // =========================================================================

    /// Resolve any revision (tag, branch, remote-tracking ref, sha) to the
    /// commit it points at.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if the revision does not exist
    pub fn resolve(&self, revision: &str) -> Result<Oid, GitError> {
        let object = self
            .repo
            .revparse_single(revision)
            .map_err(|e| GitError::from_git2(e, revision))?;

        let commit = object
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, revision))?;

        Oid::new(commit.id().to_string()).map_err(|e| e.into())
    }

    /// Get HEAD commit OID.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if HEAD is unborn (new repository)
    pub fn head_oid(&self) -> Result<Oid, GitError> {
        let head = self
            .repo
            .head()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;

        let oid = head
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?
            .id();

        Oid::new(oid.to_string()).map_err(|e| e.into())
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Subjects of the commits reachable from `to` but not from `from`.
    ///
    /// Newest first, like `git log from..to`. Duplicates are kept; callers
    /// decide how to collapse them.
    pub fn commit_subjects(&self, from: &Oid, to: &Oid) -> Result<Vec<String>, GitError> {
        let from_oid = git2::Oid::from_str(from.as_str())
            .map_err(|e| GitError::from_git2(e, from.as_str()))?;
        let to_oid =
            git2::Oid::from_str(to.as_str()).map_err(|e| GitError::from_git2(e, to.as_str()))?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TIME)?;
        revwalk.push(to_oid)?;
        revwalk.hide(from_oid)?;

        let mut subjects = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            subjects.push(commit.summary().unwrap_or("").to_string());
        }
        Ok(subjects)
    }
}

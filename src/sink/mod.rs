//! sink
//!
//! Where rendered notes go: files on disk and CI output values.
//!
//! # Modules
//!
//! - [`ci`]: process-output protocol consumed by the CI orchestrator
//!
//! File writes create missing parent directories. Truncating writes replace
//! the previous notes; appending writes grow a changelog across runs.

pub mod ci;

pub use ci::{CiOutputs, OutputProtocol};

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from writing outputs.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SinkError {
    fn write(path: &Path) -> impl FnOnce(std::io::Error) -> SinkError + '_ {
        move |source| SinkError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn ensure_parent(path: &Path) -> Result<(), SinkError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(SinkError::write(path))
        }
        _ => Ok(()),
    }
}

/// Replace the contents of `path` with `text`.
pub fn write_truncate(path: &Path, text: &str) -> Result<(), SinkError> {
    ensure_parent(path)?;
    fs::write(path, text).map_err(SinkError::write(path))
}

/// Append `text` to `path`, creating it if needed.
pub fn append(path: &Path, text: &str) -> Result<(), SinkError> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(SinkError::write(path))?;
    file.write_all(text.as_bytes())
        .map_err(SinkError::write(path))
}

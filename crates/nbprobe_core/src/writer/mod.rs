//! Notebook write strategies and shared file plumbing.
//!
//! # Responsibility
//! - Define the error taxonomy shared by every write strategy.
//! - Provide the default serialize/load helpers used by the strategies.
//!
//! # Invariants
//! - Write paths must call `Notebook::validate()` before touching disk.
//! - Strategies never recover from I/O failures locally; errors propagate
//!   to the driver.

use crate::model::notebook::{Notebook, NotebookValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub mod atomic;
pub mod builder;
pub mod direct;
pub mod incremental;

pub type WriteResult<T> = Result<T, WriteError>;

/// Errors raised by the write strategies.
#[derive(Debug)]
pub enum WriteError {
    /// File system failure at a specific path.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Document could not be serialized.
    Serialize(serde_json::Error),
    /// Existing file is not valid JSON or not notebook-shaped.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Document failed its own invariants before serialization.
    Validation(NotebookValidationError),
}

impl WriteError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for WriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "file operation failed at `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize notebook: {err}"),
            Self::Parse { path, source } => write!(
                f,
                "existing file at `{}` is not a valid notebook: {source}",
                path.display()
            ),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Parse { source, .. } => Some(source),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<NotebookValidationError> for WriteError {
    fn from(value: NotebookValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Loads and strictly parses a notebook document from `path`.
///
/// # Errors
/// - `WriteError::Io` when the file cannot be read.
/// - `WriteError::Parse` when the content is not valid JSON or lacks the
///   required document shape.
pub fn load_document(path: &Path) -> WriteResult<Notebook> {
    let bytes = fs::read(path).map_err(|err| WriteError::io(path, err))?;
    serde_json::from_slice(&bytes).map_err(|err| WriteError::parse(path, err))
}

/// Validates `notebook` and overwrites `path` with two-space-indented JSON
/// in a single open-write-close sequence.
pub(crate) fn write_document(notebook: &Notebook, path: &Path) -> WriteResult<()> {
    notebook.validate()?;

    let file = File::create(path).map_err(|err| WriteError::io(path, err))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, notebook).map_err(WriteError::Serialize)?;
    out.flush().map_err(|err| WriteError::io(path, err))?;
    Ok(())
}

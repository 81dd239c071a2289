//! Atomic replace strategy.
//!
//! # Responsibility
//! - Serialize to a sibling temporary path, then rename onto the target.
//!
//! # Invariants
//! - Readers polling the target observe either the previous complete
//!   document or the new complete document, never a partial write.
//! - The temporary file lives next to the target so the rename stays on
//!   one filesystem.

use crate::model::notebook::{Cell, Notebook};
use crate::writer::{write_document, WriteError, WriteResult};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to the target path for the staging file.
pub const TMP_SUFFIX: &str = ".tmp";

const ATOMIC_SOURCE: [&str; 2] = [
    "# This cell was added by atomic replace\n",
    "print('Hello from atomic replace!')",
];

/// Replaces `path` with a fresh single-cell document via rename.
///
/// The rename is the only operation that changes what readers see; until it
/// completes, the previous content at `path` stays fully visible.
pub fn write_atomic(path: &Path) -> WriteResult<()> {
    let staging = staging_path(path);

    let mut notebook = Notebook::new();
    notebook.push_cell(Cell::code(ATOMIC_SOURCE));
    write_document(&notebook, &staging)?;

    fs::rename(&staging, path).map_err(|err| WriteError::io(path, err))?;
    info!(
        "event=atomic_write module=writer status=ok path={} staging={}",
        path.display(),
        staging.display()
    );
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(TMP_SUFFIX);
    PathBuf::from(raw)
}

//! Incremental append strategy.
//!
//! # Responsibility
//! - Read the current document, append exactly one new cell, write back.
//!
//! # Invariants
//! - Existing cells are preserved unchanged, in order.
//! - The appended cell's source embeds a wall-clock timestamp so repeated
//!   runs produce distinct cells.
//! - A present-but-invalid file is a hard error, not a reset.

use crate::model::notebook::{Cell, Notebook};
use crate::writer::{load_document, write_document, WriteResult};
use log::info;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Appends one timestamped code cell to the document at `path`.
///
/// Synthesizes an empty document with the standard metadata skeleton when
/// the file does not exist. The rewrite is a plain overwrite, deliberately
/// non-atomic, so a watcher can be observed against truncate-then-write
/// behavior as well.
///
/// # Errors
/// - `WriteError::Parse` when an existing file is not a valid notebook.
/// - `WriteError::Io` on read or write failure.
pub fn append_timestamped_cell(path: &Path) -> WriteResult<()> {
    let mut notebook = if path.exists() {
        load_document(path)?
    } else {
        Notebook::new()
    };

    let stamp = unix_timestamp_nanos();
    notebook.push_cell(Cell::code([
        "# This cell was added by incremental append\n".to_string(),
        format!("print('Hello from incremental append at {stamp}!')"),
    ]));

    write_document(&notebook, path)?;
    info!(
        "event=incremental_append module=writer status=ok path={} cells={}",
        path.display(),
        notebook.cells.len()
    );
    Ok(())
}

// Nanosecond resolution keeps back-to-back in-process appends distinct; a
// pre-epoch clock degrades to 0 rather than failing the write.
fn unix_timestamp_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
}

//! Direct overwrite strategy.
//!
//! The plainest write style an external process can use: build the whole
//! document in memory and overwrite the target in one open-write-close
//! sequence, the way a text editor saves a file.

use crate::model::notebook::{Cell, Notebook};
use crate::writer::{write_document, WriteResult};
use log::info;
use std::path::Path;

const DIRECT_SOURCE: [&str; 2] = [
    "# This cell was added by direct overwrite\n",
    "print('Hello from direct overwrite!')",
];

/// Overwrites `path` with a fresh single-cell document.
///
/// # Contract
/// - The written document has exactly one code cell with a fixed two-line
///   source.
/// - Any prior content at `path` is replaced.
pub fn write_direct(path: &Path) -> WriteResult<()> {
    let mut notebook = Notebook::new();
    notebook.push_cell(Cell::code(DIRECT_SOURCE));

    write_document(&notebook, path)?;
    info!(
        "event=direct_write module=writer status=ok path={}",
        path.display()
    );
    Ok(())
}

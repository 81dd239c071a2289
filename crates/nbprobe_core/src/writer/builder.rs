//! Builder-mediated write strategy.
//!
//! # Responsibility
//! - Define the construction seam for "assemble a valid document and its
//!   cells, and serialize it".
//! - Provide the default nbformat-4 implementation of that seam.
//!
//! # Invariants
//! - The builder's serializer owns its whitespace convention; the default
//!   uses one-space indentation, distinct from the two-space convention of
//!   the other strategies, so an observer sees a different byte pattern.
//! - Builder implementations are compile-time dependencies; there is no
//!   runtime install-and-retry path.

use crate::model::notebook::{Cell, CellSource, CellType, Notebook};
use crate::writer::{WriteError, WriteResult};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const BUILDER_CODE_SOURCE: &str =
    "# This cell was added by the notebook builder\nprint('Hello from the notebook builder!')";
const BUILDER_MARKDOWN_SOURCE: &str =
    "## Builder write\nThis cell was added through the notebook builder seam.";

/// Construction seam over notebook assembly and serialization.
pub trait NotebookBuilder {
    /// Returns an empty document with the builder's metadata skeleton.
    fn new_notebook(&self) -> Notebook;
    /// Builds a code cell from one source block.
    fn new_code_cell(&self, source: &str) -> Cell;
    /// Builds a markdown cell from one source block.
    fn new_markdown_cell(&self, source: &str) -> Cell;
    /// Serializes `notebook` to `path` using the builder's own conventions.
    fn write(&self, notebook: &Notebook, path: &Path) -> WriteResult<()>;
}

/// Default nbformat-4 builder.
pub struct V4Builder;

impl NotebookBuilder for V4Builder {
    fn new_notebook(&self) -> Notebook {
        Notebook::new()
    }

    fn new_code_cell(&self, source: &str) -> Cell {
        Cell::new(CellType::Code, CellSource::Block(source.to_string()))
    }

    fn new_markdown_cell(&self, source: &str) -> Cell {
        Cell::new(CellType::Markdown, CellSource::Block(source.to_string()))
    }

    fn write(&self, notebook: &Notebook, path: &Path) -> WriteResult<()> {
        notebook.validate()?;

        let file = File::create(path).map_err(|err| WriteError::io(path, err))?;
        let mut out = BufWriter::new(file);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        notebook
            .serialize(&mut ser)
            .map_err(WriteError::Serialize)?;
        out.flush().map_err(|err| WriteError::io(path, err))?;
        Ok(())
    }
}

/// Overwrites `path` with a two-cell document assembled through `builder`.
///
/// # Contract
/// - The written document has exactly one code cell and one markdown cell,
///   in that order.
/// - Serialization is fully delegated to the builder.
pub fn write_with_builder<B: NotebookBuilder>(builder: &B, path: &Path) -> WriteResult<()> {
    let mut notebook = builder.new_notebook();
    notebook.push_cell(builder.new_code_cell(BUILDER_CODE_SOURCE));
    notebook.push_cell(builder.new_markdown_cell(BUILDER_MARKDOWN_SOURCE));

    builder.write(&notebook, path)?;
    info!(
        "event=builder_write module=writer status=ok path={} cells={}",
        path.display(),
        notebook.cells.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NotebookBuilder, V4Builder};
    use crate::model::notebook::{CellSource, CellType};

    #[test]
    fn v4_builder_cells_use_block_sources() {
        let builder = V4Builder;

        let code = builder.new_code_cell("print('x')");
        assert_eq!(code.cell_type, CellType::Code);
        assert_eq!(code.source, CellSource::Block("print('x')".to_string()));
        assert_eq!(code.execution_count, None);

        let markdown = builder.new_markdown_cell("## title");
        assert_eq!(markdown.cell_type, CellType::Markdown);
        assert_eq!(markdown.source, CellSource::Block("## title".to_string()));
    }

    #[test]
    fn v4_builder_notebook_matches_model_skeleton() {
        let notebook = V4Builder.new_notebook();
        assert!(notebook.cells.is_empty());
        assert!(notebook.validate().is_ok());
    }
}

//! Notebook and cell domain model.
//!
//! # Responsibility
//! - Model the nbformat 4.4 JSON document shape used by every writer.
//! - Provide constructors for the cell kinds the harness emits.
//!
//! # Invariants
//! - `nbformat` / `nbformat_minor` are fixed at 4 / 4 for written documents.
//! - Cells the harness creates never carry an `execution_count`.
//! - Foreign documents loaded from disk keep unknown metadata keys intact.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Major notebook format version written by this crate.
pub const NBFORMAT_MAJOR: i64 = 4;
/// Minor notebook format version written by this crate.
pub const NBFORMAT_MINOR: i64 = 4;

const DEFAULT_KERNEL_DISPLAY_NAME: &str = "Python 3";
const DEFAULT_KERNEL_LANGUAGE: &str = "python";
const DEFAULT_KERNEL_NAME: &str = "python3";
const DEFAULT_LANGUAGE_VERSION: &str = "3.8.0";

/// Content category of one notebook cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    /// Executable source cell.
    Code,
    /// Rendered markdown cell.
    Markdown,
    /// Unrendered passthrough cell.
    Raw,
}

/// Cell text in either of the two wire forms nbformat accepts.
///
/// The array-of-lines form keeps trailing `\n` on every line except the
/// last; the block form is one string with embedded newlines. Both are
/// preserved as written so a rewrite does not change an existing cell's
/// byte representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellSource {
    /// `"source": ["line\n", "line"]`
    Lines(Vec<String>),
    /// `"source": "line\nline"`
    Block(String),
}

impl CellSource {
    /// Returns the cell text with line fragments concatenated.
    pub fn joined(&self) -> String {
        match self {
            Self::Lines(lines) => lines.concat(),
            Self::Block(text) => text.clone(),
        }
    }
}

/// One unit of notebook content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    /// Always `None` for cells this harness creates; tolerated on load.
    #[serde(default)]
    pub execution_count: Option<i64>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Opaque on load; empty for cells this harness creates.
    #[serde(default)]
    pub outputs: Vec<Value>,
    pub source: CellSource,
}

impl Cell {
    /// Creates a cell with empty metadata and outputs.
    pub fn new(cell_type: CellType, source: CellSource) -> Self {
        Self {
            cell_type,
            execution_count: None,
            metadata: Map::new(),
            outputs: Vec::new(),
            source,
        }
    }

    /// Creates a code cell from the array-of-lines wire form.
    pub fn code<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            CellType::Code,
            CellSource::Lines(lines.into_iter().map(Into::into).collect()),
        )
    }

    /// Creates a markdown cell from a single text block.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self::new(CellType::Markdown, CellSource::Block(text.into()))
    }
}

/// Kernel descriptor under `metadata.kernelspec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelSpec {
    pub display_name: String,
    pub language: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Language descriptor under `metadata.language_info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    pub version: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Top-level notebook metadata.
///
/// Unknown sibling keys (editor state, cloud-runtime markers) are kept in
/// `extra` so an incremental rewrite of a foreign notebook preserves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    pub kernelspec: KernelSpec,
    pub language_info: LanguageInfo,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for NotebookMetadata {
    fn default() -> Self {
        Self {
            kernelspec: KernelSpec {
                display_name: DEFAULT_KERNEL_DISPLAY_NAME.to_string(),
                language: DEFAULT_KERNEL_LANGUAGE.to_string(),
                name: DEFAULT_KERNEL_NAME.to_string(),
                extra: Map::new(),
            },
            language_info: LanguageInfo {
                name: DEFAULT_KERNEL_LANGUAGE.to_string(),
                version: DEFAULT_LANGUAGE_VERSION.to_string(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }
}

/// nbformat 4.4 notebook document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Ordered cells; order is the document's content order.
    pub cells: Vec<Cell>,
    pub metadata: NotebookMetadata,
    pub nbformat: i64,
    pub nbformat_minor: i64,
}

impl Notebook {
    /// Creates an empty document with the standard Python 3 metadata
    /// skeleton and version markers 4 / 4.
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            metadata: NotebookMetadata::default(),
            nbformat: NBFORMAT_MAJOR,
            nbformat_minor: NBFORMAT_MINOR,
        }
    }

    /// Appends one cell at the end of the document.
    pub fn push_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Validates document-level invariants.
    ///
    /// Write paths must call this before serialization so the harness can
    /// never put a malformed document on disk.
    ///
    /// # Errors
    /// - Version markers other than 4 / 4.
    /// - Empty kernelspec or language_info fields.
    /// - Non-code cells carrying an `execution_count`.
    pub fn validate(&self) -> Result<(), NotebookValidationError> {
        if self.nbformat != NBFORMAT_MAJOR || self.nbformat_minor != NBFORMAT_MINOR {
            return Err(NotebookValidationError::UnsupportedFormatVersion {
                major: self.nbformat,
                minor: self.nbformat_minor,
            });
        }

        require_field(
            &self.metadata.kernelspec.display_name,
            "kernelspec.display_name",
        )?;
        require_field(&self.metadata.kernelspec.language, "kernelspec.language")?;
        require_field(&self.metadata.kernelspec.name, "kernelspec.name")?;
        require_field(&self.metadata.language_info.name, "language_info.name")?;
        require_field(
            &self.metadata.language_info.version,
            "language_info.version",
        )?;

        for (index, cell) in self.cells.iter().enumerate() {
            if cell.cell_type != CellType::Code && cell.execution_count.is_some() {
                return Err(NotebookValidationError::UnexpectedExecutionCount { index });
            }
        }

        Ok(())
    }
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}

fn require_field(value: &str, field: &'static str) -> Result<(), NotebookValidationError> {
    if value.trim().is_empty() {
        return Err(NotebookValidationError::EmptyMetadataField(field));
    }
    Ok(())
}

/// Document-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookValidationError {
    UnsupportedFormatVersion { major: i64, minor: i64 },
    EmptyMetadataField(&'static str),
    UnexpectedExecutionCount { index: usize },
}

impl Display for NotebookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedFormatVersion { major, minor } => write!(
                f,
                "unsupported notebook format version {major}.{minor} (expected \
                 {NBFORMAT_MAJOR}.{NBFORMAT_MINOR})"
            ),
            Self::EmptyMetadataField(field) => {
                write!(f, "notebook metadata field must not be empty: {field}")
            }
            Self::UnexpectedExecutionCount { index } => write!(
                f,
                "cell {index} is not a code cell but carries an execution_count"
            ),
        }
    }
}

impl Error for NotebookValidationError {}

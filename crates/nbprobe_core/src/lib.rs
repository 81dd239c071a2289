//! Core logic for the nbprobe write-style harness.
//! This crate is the single source of truth for the notebook document shape
//! and the four write strategies the driver exercises.

pub mod harness;
pub mod logging;
pub mod model;
pub mod writer;

pub use harness::{ensure_parent_dir, Step};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::notebook::{
    Cell, CellSource, CellType, KernelSpec, LanguageInfo, Notebook, NotebookMetadata,
    NotebookValidationError, NBFORMAT_MAJOR, NBFORMAT_MINOR,
};
pub use writer::atomic::{write_atomic, TMP_SUFFIX};
pub use writer::builder::{write_with_builder, NotebookBuilder, V4Builder};
pub use writer::direct::write_direct;
pub use writer::incremental::append_timestamped_cell;
pub use writer::{load_document, WriteError, WriteResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

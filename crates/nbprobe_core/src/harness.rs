//! Write-style step catalog for the driver sequence.
//!
//! # Responsibility
//! - Name the four write styles in their fixed driver order.
//! - Dispatch each step to its writer implementation.
//!
//! # Invariants
//! - `Step::ALL` is the exact order an external observer is expected to
//!   watch: direct, builder-mediated, atomic, incremental.

use crate::writer::builder::V4Builder;
use crate::writer::{atomic, builder, direct, incremental, WriteError, WriteResult};
use std::fs;
use std::path::Path;

/// One write style exercised by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Overwrite in one open-write-close sequence.
    DirectOverwrite,
    /// Assemble and serialize through the builder seam.
    BuilderMediated,
    /// Stage to a sibling file, then rename onto the target.
    AtomicReplace,
    /// Read, append one timestamped cell, write back.
    IncrementalAppend,
}

impl Step {
    /// Fixed driver order.
    pub const ALL: [Step; 4] = [
        Step::DirectOverwrite,
        Step::BuilderMediated,
        Step::AtomicReplace,
        Step::IncrementalAppend,
    ];

    /// Short name used in progress output.
    pub fn title(self) -> &'static str {
        match self {
            Self::DirectOverwrite => "direct overwrite",
            Self::BuilderMediated => "builder-mediated write",
            Self::AtomicReplace => "atomic replace",
            Self::IncrementalAppend => "incremental append",
        }
    }

    /// One-line description of what an observer should expect.
    pub fn detail(self) -> &'static str {
        match self {
            Self::DirectOverwrite => "replaces the file like a plain editor save",
            Self::BuilderMediated => "replaces the file via the builder's own serializer",
            Self::AtomicReplace => "swaps the file in with a rename of a .tmp sibling",
            Self::IncrementalAppend => "rewrites the file with one appended cell",
        }
    }

    /// Runs this write style against `path`.
    pub fn run(self, path: &Path) -> WriteResult<()> {
        match self {
            Self::DirectOverwrite => direct::write_direct(path),
            Self::BuilderMediated => builder::write_with_builder(&V4Builder, path),
            Self::AtomicReplace => atomic::write_atomic(path),
            Self::IncrementalAppend => incremental::append_timestamped_cell(path),
        }
    }
}

/// Creates the target's parent directory when it is missing.
pub fn ensure_parent_dir(path: &Path) -> WriteResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| WriteError::io(parent, err))?;
        }
    }
    Ok(())
}

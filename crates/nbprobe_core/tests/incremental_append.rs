use nbprobe_core::{
    append_timestamped_cell, load_document, write_direct, CellType, WriteError,
};
use std::collections::HashSet;
use std::fs;

#[test]
fn sequential_appends_on_fresh_path_yield_distinct_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ipynb");

    for _ in 0..3 {
        append_timestamped_cell(&path).unwrap();
    }

    let notebook = load_document(&path).unwrap();
    assert_eq!(notebook.cells.len(), 3);

    let sources: HashSet<String> = notebook
        .cells
        .iter()
        .map(|cell| cell.source.joined())
        .collect();
    assert_eq!(sources.len(), 3, "timestamped sources must be distinct");

    for cell in &notebook.cells {
        assert_eq!(cell.cell_type, CellType::Code);
        assert!(cell
            .source
            .joined()
            .starts_with("# This cell was added by incremental append\n"));
    }
}

#[test]
fn append_on_absent_path_synthesizes_metadata_skeleton() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ipynb");

    append_timestamped_cell(&path).unwrap();

    let notebook = load_document(&path).unwrap();
    assert_eq!(notebook.nbformat, 4);
    assert_eq!(notebook.nbformat_minor, 4);
    assert_eq!(notebook.metadata.kernelspec.name, "python3");
    assert_eq!(notebook.metadata.language_info.version, "3.8.0");
}

#[test]
fn append_preserves_existing_cells_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ipynb");

    write_direct(&path).unwrap();
    let before = load_document(&path).unwrap();

    append_timestamped_cell(&path).unwrap();

    let after = load_document(&path).unwrap();
    assert_eq!(after.cells.len(), before.cells.len() + 1);
    assert_eq!(&after.cells[..before.cells.len()], &before.cells[..]);
    assert_eq!(after.metadata, before.metadata);
}

#[test]
fn append_fails_on_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ipynb");
    fs::write(&path, "{ this is not json").unwrap();

    let err = append_timestamped_cell(&path).unwrap_err();
    assert!(matches!(err, WriteError::Parse { .. }), "got: {err}");

    let untouched = fs::read_to_string(&path).unwrap();
    assert_eq!(untouched, "{ this is not json");
}

#[test]
fn append_fails_on_wrong_document_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ipynb");
    fs::write(&path, r#"{"cells": 5, "nbformat": 4}"#).unwrap();

    let err = append_timestamped_cell(&path).unwrap_err();
    assert!(matches!(err, WriteError::Parse { .. }), "got: {err}");
}

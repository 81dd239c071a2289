use nbprobe_core::{
    append_timestamped_cell, load_document, write_atomic, write_direct, write_with_builder, Cell,
    CellSource, CellType, Notebook, NotebookBuilder, V4Builder, WriteResult, TMP_SUFFIX,
};
use std::fs;
use std::path::{Path, PathBuf};

fn target_in(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("test.ipynb")
}

#[test]
fn direct_overwrite_writes_single_fixed_code_cell() {
    let dir = tempfile::tempdir().unwrap();
    let path = target_in(&dir);

    write_direct(&path).unwrap();

    let notebook = load_document(&path).unwrap();
    assert_eq!(notebook.cells.len(), 1);
    assert_eq!(notebook.cells[0].cell_type, CellType::Code);
    assert_eq!(
        notebook.cells[0].source,
        CellSource::Lines(vec![
            "# This cell was added by direct overwrite\n".into(),
            "print('Hello from direct overwrite!')".into(),
        ])
    );
    assert_eq!(notebook.cells[0].execution_count, None);
    assert!(notebook.cells[0].outputs.is_empty());
}

#[test]
fn direct_overwrite_replaces_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = target_in(&dir);

    append_timestamped_cell(&path).unwrap();
    append_timestamped_cell(&path).unwrap();
    assert_eq!(load_document(&path).unwrap().cells.len(), 2);

    write_direct(&path).unwrap();
    assert_eq!(load_document(&path).unwrap().cells.len(), 1);
}

#[test]
fn direct_overwrite_uses_two_space_indentation() {
    let dir = tempfile::tempdir().unwrap();
    let path = target_in(&dir);

    write_direct(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"cells\""), "got: {}", &text[..24]);
}

#[test]
fn builder_write_produces_code_then_markdown_cell() {
    let dir = tempfile::tempdir().unwrap();
    let path = target_in(&dir);

    write_with_builder(&V4Builder, &path).unwrap();

    let notebook = load_document(&path).unwrap();
    assert_eq!(notebook.cells.len(), 2);
    assert_eq!(notebook.cells[0].cell_type, CellType::Code);
    assert_eq!(
        notebook.cells[0].source,
        CellSource::Block(
            "# This cell was added by the notebook builder\n\
             print('Hello from the notebook builder!')"
                .into()
        )
    );
    assert_eq!(notebook.cells[1].cell_type, CellType::Markdown);
    assert_eq!(
        notebook.cells[1].source,
        CellSource::Block(
            "## Builder write\nThis cell was added through the notebook builder seam.".into()
        )
    );
}

#[test]
fn builder_serializer_uses_one_space_indentation() {
    let dir = tempfile::tempdir().unwrap();
    let path = target_in(&dir);

    write_with_builder(&V4Builder, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n \"cells\""), "got: {}", &text[..24]);
}

#[test]
fn builder_seam_delegates_serialization_to_implementation() {
    struct CompactBuilder;

    impl NotebookBuilder for CompactBuilder {
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
            let compact = serde_json::to_vec(notebook).map_err(nbprobe_core::WriteError::Serialize)?;
            fs::write(path, compact).map_err(|err| nbprobe_core::WriteError::Io {
                path: path.to_path_buf(),
                source: err,
            })
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let path = target_in(&dir);

    write_with_builder(&CompactBuilder, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\"cells\""));
    assert_eq!(load_document(&path).unwrap().cells.len(), 2);
}

#[test]
fn atomic_replace_writes_single_fixed_code_cell() {
    let dir = tempfile::tempdir().unwrap();
    let path = target_in(&dir);

    write_atomic(&path).unwrap();

    let notebook = load_document(&path).unwrap();
    assert_eq!(notebook.cells.len(), 1);
    assert_eq!(notebook.cells[0].cell_type, CellType::Code);
    assert_eq!(
        notebook.cells[0].source,
        CellSource::Lines(vec![
            "# This cell was added by atomic replace\n".into(),
            "print('Hello from atomic replace!')".into(),
        ])
    );
}

#[test]
fn atomic_replace_leaves_no_staging_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = target_in(&dir);

    write_atomic(&path).unwrap();

    let mut staging = path.clone().into_os_string();
    staging.push(TMP_SUFFIX);
    assert!(!PathBuf::from(staging).exists());
    assert!(path.exists());
}

#[test]
fn atomic_replace_overwrites_existing_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = target_in(&dir);

    write_with_builder(&V4Builder, &path).unwrap();
    assert_eq!(load_document(&path).unwrap().cells.len(), 2);

    write_atomic(&path).unwrap();
    assert_eq!(load_document(&path).unwrap().cells.len(), 1);
}

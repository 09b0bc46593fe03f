//! Integration tests for directory ingestion.

use orbis_ingest::{IngestError, read_sources};
use orbis_model::CellValue;
use tempfile::TempDir;

#[test]
fn reads_sources_in_name_order() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("b.csv"), "x\n2\n").unwrap();
    std::fs::write(dir.path().join("a.csv"), "x,y\n1, padded \n").unwrap();
    std::fs::write(dir.path().join("validation_issues.csv"), "issue_type\nfoo\n").unwrap();

    let sources = read_sources(dir.path()).unwrap();

    let names: Vec<&str> = sources.iter().map(|s| s.source.as_str()).collect();
    assert_eq!(names, vec!["a.csv", "b.csv"]);
    assert_eq!(sources[0].table.cell(0, 1), Some(&CellValue::text(" padded ")));
}

#[test]
fn empty_directory_yields_no_sources() {
    let dir = TempDir::new().unwrap();
    assert!(read_sources(dir.path()).unwrap().is_empty());
}

#[test]
fn unreadable_file_fails_with_path() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("empty.csv"), "").unwrap();

    let err = read_sources(dir.path()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
    assert!(err.to_string().contains("empty.csv"));
}

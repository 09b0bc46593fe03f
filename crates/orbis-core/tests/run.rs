//! End-to-end tests for a run over a directory of CSV files.

use std::fs;
use std::path::Path;

use orbis_core::{PipelineConfig, PipelineError, RunContext, execute_run, process_sources};
use orbis_ingest::SourceTable;
use orbis_model::{CellValue, ColumnType, IssueType, StructuralError, Table};
use tempfile::TempDir;

fn write_csv(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn freight_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "faf_2019.csv",
        "State,Tons (k)\nTX,10\nCA,20\nTX,10\n",
    );
    write_csv(dir.path(), "faf_2020.csv", "State,Tons (k)\nNY,5\nOK,7\n");
    dir
}

#[test]
fn runs_merge_clean_and_validate() {
    let dir = freight_dir();
    let context = RunContext::new(dir.path(), PipelineConfig::default());

    let run = execute_run(&context).unwrap();

    assert_eq!(run.id(), &context.run_id);
    assert_eq!(run.sources(), ["faf_2019.csv", "faf_2020.csv"]);
    assert_eq!(run.merged().row_count(), 5);
    assert_eq!(
        run.merged().column_names().collect::<Vec<_>>(),
        vec!["State", "Tons (k)", "source_file"]
    );

    let cleaned = run.cleaned();
    assert_eq!(
        cleaned.column_names().collect::<Vec<_>>(),
        vec!["state", "tons_k", "source_file"]
    );
    assert_eq!(cleaned.columns()[1].dtype, ColumnType::Numeric);
    assert_eq!(cleaned.row_count(), 4);
    assert_eq!(cleaned.cell(3, 1), Some(&CellValue::Number(7.0)));
    assert_eq!(run.duplicates_removed(), 1);

    assert_eq!(run.profiles().len(), 3);
    assert_eq!(run.profiles()[1].mean, Some(10.5));

    let types: Vec<IssueType> = run.issues().iter().map(|i| i.issue_type).collect();
    assert_eq!(types, vec![IssueType::DuplicateRowsRemoved]);
}

#[test]
fn metadata_counts_match_run() {
    let dir = freight_dir();
    let run = execute_run(&RunContext::new(dir.path(), PipelineConfig::default())).unwrap();

    let metadata = run.metadata();

    assert_eq!(metadata.merged_rows, 5);
    assert_eq!(metadata.cleaned_rows, 4);
    assert_eq!(metadata.cleaned_columns, 3);
    assert_eq!(metadata.issue_count, 1);
    assert!(metadata.finished_at >= metadata.started_at);
}

#[test]
fn empty_directory_is_structural() {
    let dir = TempDir::new().unwrap();
    let err = execute_run(&RunContext::new(dir.path(), PipelineConfig::default())).unwrap_err();

    assert!(err.is_structural());
    assert!(matches!(
        err,
        PipelineError::Structural {
            source: StructuralError::NoInputs,
            ..
        }
    ));
}

#[test]
fn process_sources_rejects_empty_input() {
    let context = RunContext::new("/nonexistent", PipelineConfig::default());
    let err = process_sources(&context, &[]).unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn missing_directory_is_an_ingest_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent");
    let err = execute_run(&RunContext::new(missing, PipelineConfig::default())).unwrap_err();

    assert!(matches!(err, PipelineError::Ingest(_)));
    assert!(!err.is_structural());
}

#[test]
fn invalid_config_aborts_before_reading() {
    let dir = freight_dir();
    let mut config = PipelineConfig::default();
    config.cleaning.coercion_threshold = 0.4;

    let err = execute_run(&RunContext::new(dir.path(), config)).unwrap_err();

    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn custom_provenance_column_is_tracked() {
    let dir = freight_dir();
    let config = PipelineConfig {
        provenance_column: "Origin File".to_string(),
        ..PipelineConfig::default()
    };

    let run = execute_run(&RunContext::new(dir.path(), config)).unwrap();

    assert_eq!(run.cleaned().column_names().last(), Some("origin_file"));
    assert!(
        run.issues()
            .iter()
            .all(|i| i.issue_type != IssueType::SourceFileMissing)
    );
}

#[test]
fn each_run_gets_a_unique_id() {
    let dir = freight_dir();
    let first = execute_run(&RunContext::new(dir.path(), PipelineConfig::default())).unwrap();
    let second = execute_run(&RunContext::new(dir.path(), PipelineConfig::default())).unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(first.cleaned(), second.cleaned());
    assert_eq!(first.issues(), second.issues());
}

fn source(name: &str, columns: &[&str], rows: &[&[&str]]) -> SourceTable {
    let mut table = Table::with_text_columns(columns.iter().copied()).unwrap();
    for row in rows {
        table
            .push_row(row.iter().map(|v| CellValue::text(*v)).collect())
            .unwrap();
    }
    SourceTable {
        source: name.to_string(),
        table,
    }
}

#[test]
fn disjoint_columns_survive_merge_and_cleaning() {
    let sources = [
        source("a.csv", &["a", "b"], &[&["1", "x"]]),
        source("b.csv", &["a", "c"], &[&["2", "y"]]),
    ];
    let context = RunContext::new("/data/in", PipelineConfig::default());

    let run = process_sources(&context, &sources).unwrap();

    let cleaned = run.cleaned();
    assert_eq!(
        cleaned.column_names().collect::<Vec<_>>(),
        vec!["a", "b", "c", "source_file"]
    );
    assert_eq!(cleaned.row_count(), 2);
    assert_eq!(cleaned.cell(0, 2), Some(&CellValue::Missing));
    assert_eq!(cleaned.cell(1, 1), Some(&CellValue::Missing));
    assert_eq!(cleaned.cell(1, 2), Some(&CellValue::text("y")));
}

#[test]
fn repeated_header_labels_get_ordered_suffixes() {
    let dir = TempDir::new().unwrap();
    write_csv(dir.path(), "faf.csv", "Tons,Tons,TONS\n1,2,3\n");

    let run = execute_run(&RunContext::new(dir.path(), PipelineConfig::default())).unwrap();

    assert_eq!(
        run.cleaned().column_names().collect::<Vec<_>>(),
        vec!["tons", "tons_2", "tons_3", "source_file"]
    );
    assert_eq!(run.cleaned().cell(0, 1), Some(&CellValue::Number(2.0)));
}

#[test]
fn mixed_type_is_judged_before_duplicates_are_removed() {
    let dir = TempDir::new().unwrap();
    let mut content = String::from("v\n");
    for value in 1..=17 {
        content.push_str(&format!("{value}\n"));
    }
    content.push_str("x\nx\nx\n");
    write_csv(dir.path(), "faf.csv", &content);

    let run = execute_run(&RunContext::new(dir.path(), PipelineConfig::default())).unwrap();

    assert_eq!(run.cleaned().columns()[0].dtype, ColumnType::Text);
    assert_eq!(run.duplicates_removed(), 2);
    let mixed: Vec<_> = run
        .issues()
        .iter()
        .filter(|i| i.issue_type == IssueType::MixedTypeSuspect)
        .collect();
    assert_eq!(mixed.len(), 1);
    assert_eq!(mixed[0].column, "v");
    assert_eq!(mixed[0].pct, 0.85);
}

//! File names of the artifacts a run persists.

pub const MERGED_FILE: &str = "merged.csv";
pub const CLEANED_FILE: &str = "merged_cleaned.csv";
pub const VALIDATION_COLUMNS_FILE: &str = "validation_columns.csv";
pub const VALIDATION_ISSUES_FILE: &str = "validation_issues.csv";
pub const MANIFEST_FILE: &str = "run.json";

/// CSV artifacts that must never be ingested as source data.
pub const CSV_ARTIFACTS: [&str; 4] = [
    MERGED_FILE,
    CLEANED_FILE,
    VALIDATION_COLUMNS_FILE,
    VALIDATION_ISSUES_FILE,
];

/// Returns true when `file_name` is one of the pipeline's own CSV outputs.
pub fn is_csv_artifact(file_name: &str) -> bool {
    CSV_ARTIFACTS
        .iter()
        .any(|artifact| artifact.eq_ignore_ascii_case(file_name))
}

//! Provenance column checks.

use std::collections::{BTreeSet, HashSet};

use orbis_model::{CellValue, IssueRecord, IssueType, Table, fraction};

/// Distinct offending values listed in the issue details.
pub const SAMPLE_VALUES: usize = 10;

/// Verifies the provenance column exists, is populated and names ingested sources.
pub fn check(table: &Table, column: &str, sources: &[String]) -> Vec<IssueRecord> {
    let rows = table.row_count();
    let Some(idx) = table.column_index(column) else {
        return vec![IssueRecord::column(
            IssueType::SourceFileMissing,
            column,
            rows,
            fraction(rows, rows),
            format!("column '{column}' not found"),
        )];
    };

    let mut issues = Vec::new();
    let nulls = table.column_values(idx).filter(|c| c.is_missing()).count();
    if nulls > 0 {
        issues.push(IssueRecord::column(
            IssueType::SourceFileNull,
            column,
            nulls,
            fraction(nulls, rows),
            format!("{nulls} rows without a source file"),
        ));
    }

    if !sources.is_empty() {
        let known: HashSet<&str> = sources.iter().map(String::as_str).collect();
        let mut invalid = 0usize;
        let mut samples = BTreeSet::new();
        for cell in table.column_values(idx) {
            let value = match cell {
                CellValue::Missing => continue,
                other => other.to_string(),
            };
            if !known.contains(value.as_str()) {
                invalid += 1;
                if samples.len() < SAMPLE_VALUES {
                    samples.insert(value);
                }
            }
        }
        if invalid > 0 {
            issues.push(IssueRecord::column(
                IssueType::SourceFileInvalid,
                column,
                invalid,
                fraction(invalid, rows),
                format!("values not among ingested sources: {samples:?}"),
            ));
        }
    }

    issues
}

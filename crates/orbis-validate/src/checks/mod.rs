//! Individual issue checks. Each one is read-only over the cleaned table.

pub mod constant;
pub mod duplicates;
pub mod mixed_type;
pub mod negative;
pub mod nulls;
pub mod provenance;

use orbis_model::{CoercionDecision, IssueRecord, Table};

use crate::config::ValidationConfig;

/// Everything the checks read besides their thresholds.
#[derive(Debug, Clone, Copy)]
pub struct DetectorInput<'a> {
    pub table: &'a Table,
    /// Rows in the merged table before cleaning.
    pub merged_rows: usize,
    pub duplicates_removed: usize,
    /// Canonical name of the provenance column.
    pub provenance_column: &'a str,
    /// Names of the ingested sources, used to validate provenance values.
    pub sources: &'a [String],
    /// Per-column coercion outcomes from the cleaning pass.
    pub coercions: &'a [CoercionDecision],
    /// Threshold the cleaning pass used to coerce text columns.
    pub coercion_threshold: f64,
}

/// Runs every enabled check. Per-column findings come first, in column order,
/// followed by provenance findings and the duplicate row summary.
pub fn run_all(input: &DetectorInput<'_>, config: &ValidationConfig) -> Vec<IssueRecord> {
    let table = input.table;
    let toggles = config.checks;
    let mut issues = Vec::new();

    for idx in 0..table.column_count() {
        if toggles.high_null_rate
            && let Some(issue) = nulls::check(table, idx, config.null_rate_threshold)
        {
            issues.push(issue);
        }
        if toggles.constant_column
            && let Some(issue) = constant::check(table, idx)
        {
            issues.push(issue);
        }
        if toggles.mixed_type_suspect
            && let Some(issue) = mixed_type::check(
                table,
                idx,
                input.coercions,
                config.mixed_type_threshold,
                input.coercion_threshold,
            )
        {
            issues.push(issue);
        }
        if toggles.negative_values
            && let Some(issue) = negative::check(table, idx)
        {
            issues.push(issue);
        }
    }

    if toggles.provenance {
        issues.extend(provenance::check(
            table,
            input.provenance_column,
            input.sources,
        ));
    }

    issues.extend(duplicates::check(input.duplicates_removed, input.merged_rows));

    tracing::debug!(issue_count = issues.len(), "issue detection complete");
    issues
}

//! High null rate check.

use orbis_model::{IssueRecord, IssueType, Table, fraction};

/// Flags a column whose share of missing cells strictly exceeds `threshold`.
pub fn check(table: &Table, idx: usize, threshold: f64) -> Option<IssueRecord> {
    let rows = table.row_count();
    let nulls = table.column_values(idx).filter(|c| c.is_missing()).count();
    let rate = fraction(nulls, rows);
    if rows == 0 || rate <= threshold {
        return None;
    }
    Some(IssueRecord::column(
        IssueType::HighNullRate,
        &table.columns()[idx].name,
        nulls,
        rate,
        format!(
            "null rate {:.2}% exceeds threshold {:.2}% ({nulls} of {rows} rows missing)",
            rate * 100.0,
            threshold * 100.0
        ),
    ))
}

//! Negative values in numeric columns.

use orbis_model::{ColumnType, IssueRecord, IssueType, Table, fraction};

/// Row indices listed in the issue details.
pub const SAMPLE_ROWS: usize = 10;

pub fn check(table: &Table, idx: usize) -> Option<IssueRecord> {
    let column = &table.columns()[idx];
    if column.dtype != ColumnType::Numeric {
        return None;
    }
    let rows: Vec<usize> = table
        .column_values(idx)
        .enumerate()
        .filter(|(_, cell)| cell.as_number().is_some_and(|v| v < 0.0))
        .map(|(row, _)| row)
        .collect();
    if rows.is_empty() {
        return None;
    }
    let sample: Vec<usize> = rows.iter().copied().take(SAMPLE_ROWS).collect();
    Some(IssueRecord::column(
        IssueType::NegativeValues,
        &column.name,
        rows.len(),
        fraction(rows.len(), table.row_count()),
        format!("{} negative values; sample row indices: {sample:?}", rows.len()),
    ))
}

//! Constant column check.

use std::collections::HashSet;

use orbis_model::{IssueRecord, IssueType, Table, fraction};

/// Flags a column holding exactly one distinct non-missing value.
pub fn check(table: &Table, idx: usize) -> Option<IssueRecord> {
    let mut distinct = HashSet::new();
    let mut non_null = 0usize;
    let mut first = None;
    for cell in table.column_values(idx).filter(|c| !c.is_missing()) {
        non_null += 1;
        if distinct.insert(cell.dedup_key()) {
            if distinct.len() > 1 {
                return None;
            }
            first = Some(cell);
        }
    }
    let value = first?;
    Some(IssueRecord::column(
        IssueType::ConstantColumn,
        &table.columns()[idx].name,
        non_null,
        fraction(non_null, table.row_count()),
        format!("single distinct value \"{value}\" across {non_null} non-missing cells"),
    ))
}

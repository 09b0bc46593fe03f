//! Duplicate rows removed during cleaning.

use orbis_model::{IssueRecord, IssueType, fraction};

/// Reports the cleaning pass's duplicate removal once, as a table-level issue.
pub fn check(removed: usize, merged_rows: usize) -> Option<IssueRecord> {
    if removed == 0 {
        return None;
    }
    Some(IssueRecord::table(
        IssueType::DuplicateRowsRemoved,
        removed,
        fraction(removed, merged_rows),
        format!("{removed} duplicate rows removed out of {merged_rows}"),
    ))
}

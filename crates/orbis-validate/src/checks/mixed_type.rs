//! Mixed type suspicion for text columns.

use orbis_model::{CoercionDecision, ColumnType, IssueRecord, IssueType, NumericEvidence, Table};

/// Flags a text column whose parseable share lies strictly between
/// `mixed_threshold` and `coercion_threshold`.
///
/// The share is the one the coercer measured when it left the column as
/// text. Columns without a decision are measured on `table`.
pub fn check(
    table: &Table,
    idx: usize,
    decisions: &[CoercionDecision],
    mixed_threshold: f64,
    coercion_threshold: f64,
) -> Option<IssueRecord> {
    let column = &table.columns()[idx];
    if column.dtype != ColumnType::Text {
        return None;
    }
    let evidence = match decisions.iter().find(|d| d.column == column.name) {
        Some(decision) if decision.coerced => return None,
        Some(decision) => NumericEvidence {
            evidence: decision.evidence,
            parseable: decision.parseable,
        },
        None => NumericEvidence::from_cells(table.column_values(idx)),
    };
    let share = evidence.fraction()?;
    if share <= mixed_threshold || share >= coercion_threshold {
        return None;
    }
    Some(IssueRecord::column(
        IssueType::MixedTypeSuspect,
        &column.name,
        evidence.parseable,
        share,
        format!(
            "{:.2}% of {} values parse as numeric, above mixed-type threshold {:.2}% \
             and below coercion threshold {:.2}%",
            share * 100.0,
            evidence.evidence,
            mixed_threshold * 100.0,
            coercion_threshold * 100.0
        ),
    ))
}

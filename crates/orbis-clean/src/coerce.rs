//! Density-based numeric coercion of text columns.

use serde::{Deserialize, Serialize};
use tracing::debug;

use orbis_model::redact::redact_value;
use orbis_model::{
    CellValue, CoercionDecision, Column, ColumnType, ModelError, NumericEvidence, Table,
    parse_numeric,
};

/// Minimum parseable share for a text column to become numeric.
pub const DEFAULT_COERCION_THRESHOLD: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoercionConfig {
    /// Inclusive lower bound on `parseable / evidence`.
    pub coercion_threshold: f64,
}

impl Default for CoercionConfig {
    fn default() -> Self {
        Self {
            coercion_threshold: DEFAULT_COERCION_THRESHOLD,
        }
    }
}

/// Casts each text column to numeric when enough of its values parse.
///
/// Decisions are independent per column. Numeric columns pass through.
pub fn coerce_columns(
    table: &Table,
    config: &CoercionConfig,
) -> Result<(Table, Vec<CoercionDecision>), ModelError> {
    let mut columns = Vec::with_capacity(table.column_count());
    let mut decisions = Vec::new();
    let mut coerced_indices = Vec::new();

    for (idx, column) in table.columns().iter().enumerate() {
        if column.dtype != ColumnType::Text {
            columns.push(column.clone());
            continue;
        }

        let evidence = NumericEvidence::from_cells(table.column_values(idx));
        let fraction = evidence.fraction();
        let coerced = fraction.is_some_and(|f| f >= config.coercion_threshold);
        let skipped = if coerced {
            evidence.evidence - evidence.parseable
        } else {
            0
        };

        debug!(
            column = %column.name,
            evidence = evidence.evidence,
            parseable = evidence.parseable,
            coerced,
            "coercion decision"
        );

        if coerced {
            coerced_indices.push(idx);
            columns.push(Column::numeric(column.name.clone()));
        } else {
            columns.push(column.clone());
        }
        decisions.push(CoercionDecision {
            column: column.name.clone(),
            evidence: evidence.evidence,
            parseable: evidence.parseable,
            fraction,
            coerced,
            skipped,
        });
    }

    let rows = table
        .rows()
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let mut out = row.clone();
            for &idx in &coerced_indices {
                out[idx] = coerce_cell(&row[idx], &table.columns()[idx].name, row_idx);
            }
            out
        })
        .collect();

    Ok((Table::from_parts(columns, rows)?, decisions))
}

fn coerce_cell(cell: &CellValue, column: &str, row: usize) -> CellValue {
    let CellValue::Text(text) = cell else {
        return cell.clone();
    };
    if let Some(value) = parse_numeric(text) {
        return CellValue::Number(value);
    }
    if !text.trim().is_empty() {
        debug!(
            column = column,
            row,
            value = redact_value(text),
            "value not numeric, set to missing"
        );
    }
    CellValue::Missing
}

//! Row sanitizing: whitespace, blanks, empty columns and duplicate rows.

use std::collections::HashSet;

use orbis_model::{CellKey, CellValue, ModelError, Table};

/// Counts from one sanitizer pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeStats {
    /// Names of columns removed because every cell was missing.
    pub dropped_columns: Vec<String>,
    pub duplicates_removed: usize,
}

/// Applies, in order: trim text cells, map blank text to missing, drop
/// all-missing columns, collapse duplicate rows to their first occurrence.
pub fn sanitize(table: &Table) -> Result<(Table, SanitizeStats), ModelError> {
    let trimmed: Vec<Vec<CellValue>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(trim_cell).collect())
        .collect();

    let width = table.column_count();
    let keep: Vec<usize> = if trimmed.is_empty() {
        (0..width).collect()
    } else {
        (0..width)
            .filter(|&idx| trimmed.iter().any(|row| !row[idx].is_missing()))
            .collect()
    };
    let dropped_columns: Vec<String> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(idx, _)| !keep.contains(idx))
        .map(|(_, column)| column.name.clone())
        .collect();
    if !dropped_columns.is_empty() {
        tracing::info!(columns = ?dropped_columns, "dropped empty columns");
    }

    let columns = keep
        .iter()
        .map(|&idx| table.columns()[idx].clone())
        .collect();
    let projected: Vec<Vec<CellValue>> = trimmed
        .into_iter()
        .map(|row| keep.iter().map(|&idx| row[idx].clone()).collect())
        .collect();

    let (rows, duplicates_removed) = dedup_rows(projected);
    if duplicates_removed > 0 {
        tracing::info!(duplicates_removed, "removed duplicate rows");
    }

    let table = Table::from_parts(columns, rows)?;
    Ok((
        table,
        SanitizeStats {
            dropped_columns,
            duplicates_removed,
        },
    ))
}

fn trim_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                CellValue::Missing
            } else {
                CellValue::text(trimmed)
            }
        }
        other => other.clone(),
    }
}

/// Keeps the first occurrence of each distinct row, preserving order.
fn dedup_rows(rows: Vec<Vec<CellValue>>) -> (Vec<Vec<CellValue>>, usize) {
    let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(rows.len());
    let mut keep = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let key: Vec<CellKey<'_>> = row.iter().map(CellValue::dedup_key).collect();
        keep.push(seen.insert(key));
        if !keep[idx] {
            tracing::trace!(row = idx, "duplicate row");
        }
    }
    drop(seen);

    let total = rows.len();
    let unique: Vec<Vec<CellValue>> = rows
        .into_iter()
        .zip(keep)
        .filter_map(|(row, kept)| kept.then_some(row))
        .collect();
    let removed = total - unique.len();
    (unique, removed)
}

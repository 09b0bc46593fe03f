//! Vertical merge of source tables.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use orbis_ingest::SourceTable;
use orbis_model::{CellValue, Column, ColumnType, ModelError, StructuralError, Table};

/// Default name of the column recording each row's source file.
pub const DEFAULT_PROVENANCE_COLUMN: &str = "source_file";

#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Concatenates `sources` in order into one table.
///
/// Columns are the union of all source columns in order of first appearance,
/// followed by the provenance column. Cells a source does not have are
/// missing. A column is numeric only when it is numeric in every source that
/// has it; otherwise numbers are rendered as text.
pub fn merge_sources(
    sources: &[SourceTable],
    provenance_column: &str,
) -> Result<Table, MergeError> {
    if sources.is_empty() {
        return Err(StructuralError::NoInputs.into());
    }

    let mut columns: Vec<Column> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for source in sources {
        for column in source.table.columns() {
            if column.name == provenance_column {
                warn!(
                    source = %source.source,
                    column = provenance_column,
                    "source column overwritten by provenance"
                );
                continue;
            }
            match positions.get(&column.name) {
                Some(&idx) => {
                    if columns[idx].dtype != column.dtype {
                        columns[idx].dtype = ColumnType::Text;
                    }
                }
                None => {
                    positions.insert(column.name.clone(), columns.len());
                    columns.push(column.clone());
                }
            }
        }
    }
    if columns.is_empty() {
        return Err(StructuralError::NoColumns.into());
    }

    let total_rows: usize = sources.iter().map(|s| s.table.row_count()).sum();
    let mut rows = Vec::with_capacity(total_rows);
    for source in sources {
        let mapping: Vec<Option<usize>> = columns
            .iter()
            .map(|column| source.table.column_index(&column.name))
            .collect();
        for row in source.table.rows() {
            let mut merged: Vec<CellValue> = mapping
                .iter()
                .zip(&columns)
                .map(|(position, column)| match position {
                    Some(idx) => conform(&row[*idx], column.dtype),
                    None => CellValue::Missing,
                })
                .collect();
            merged.push(CellValue::text(source.source.as_str()));
            rows.push(merged);
        }
        debug!(
            source = %source.source,
            rows = source.table.row_count(),
            "merged source"
        );
    }

    columns.push(Column::text(provenance_column));
    Ok(Table::from_parts(columns, rows)?)
}

fn conform(cell: &CellValue, dtype: ColumnType) -> CellValue {
    match (cell, dtype) {
        (CellValue::Number(_), ColumnType::Text) => CellValue::Text(cell.to_string()),
        _ => cell.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, columns: &[&str], rows: &[&[&str]]) -> SourceTable {
        let table = Table::from_parts(
            columns.iter().map(|c| Column::text(*c)).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| CellValue::text(*v)).collect())
                .collect(),
        )
        .unwrap();
        SourceTable {
            source: name.to_string(),
            table,
        }
    }

    #[test]
    fn unions_columns_in_first_appearance_order() {
        let sources = vec![
            source("a.csv", &["x", "y"], &[&["1", "2"]]),
            source("b.csv", &["y", "z"], &[&["3", "4"]]),
        ];

        let merged = merge_sources(&sources, DEFAULT_PROVENANCE_COLUMN).unwrap();

        assert_eq!(
            merged.column_names().collect::<Vec<_>>(),
            vec!["x", "y", "z", "source_file"]
        );
        assert_eq!(
            merged.rows()[1],
            vec![
                CellValue::Missing,
                CellValue::text("3"),
                CellValue::text("4"),
                CellValue::text("b.csv")
            ]
        );
    }

    #[test]
    fn zero_sources_is_structural() {
        assert!(matches!(
            merge_sources(&[], DEFAULT_PROVENANCE_COLUMN),
            Err(MergeError::Structural(StructuralError::NoInputs))
        ));
    }

    #[test]
    fn sources_without_columns_are_structural() {
        let sources = vec![source("a.csv", &[], &[])];
        assert!(matches!(
            merge_sources(&sources, DEFAULT_PROVENANCE_COLUMN),
            Err(MergeError::Structural(StructuralError::NoColumns))
        ));
    }

    #[test]
    fn provenance_overwrites_source_column() {
        let sources = vec![source("a.csv", &["source_file", "x"], &[&["bogus", "1"]])];
        let merged = merge_sources(&sources, DEFAULT_PROVENANCE_COLUMN).unwrap();
        assert_eq!(
            merged.rows()[0],
            vec![CellValue::text("1"), CellValue::text("a.csv")]
        );
    }

    #[test]
    fn conflicting_types_fall_back_to_text() {
        let numeric = SourceTable {
            source: "n.csv".to_string(),
            table: Table::from_parts(
                vec![Column::numeric("v")],
                vec![vec![CellValue::Number(2.5)]],
            )
            .unwrap(),
        };
        let sources = vec![numeric, source("t.csv", &["v"], &[&["x"]])];
        let merged = merge_sources(&sources, DEFAULT_PROVENANCE_COLUMN).unwrap();
        assert_eq!(merged.columns()[0].dtype, ColumnType::Text);
        assert_eq!(merged.cell(0, 0), Some(&CellValue::text("2.5")));
    }
}

//! Loading Polars `DataFrame`s into [`Table`].

use polars::prelude::{DataFrame, DataType, PolarsError};

use crate::error::{ModelError, Result};
use crate::table::{CellValue, Column, Table};

impl From<PolarsError> for ModelError {
    fn from(err: PolarsError) -> Self {
        Self::Frame(err.to_string())
    }
}

impl Table {
    /// Builds a text table from a frame, casting every column to string.
    /// Nulls become [`CellValue::Missing`]; empty strings stay text.
    pub fn from_string_frame(df: &DataFrame) -> Result<Self> {
        let height = df.height();
        let mut columns = Vec::with_capacity(df.width());
        let mut rows: Vec<Vec<CellValue>> = (0..height)
            .map(|_| Vec::with_capacity(df.width()))
            .collect();

        for column in df.get_columns() {
            columns.push(Column::text(column.name().as_str()));
            let series = column.as_materialized_series().cast(&DataType::String)?;
            let values = series.str()?;
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(match value {
                    Some(text) => CellValue::text(text),
                    None => CellValue::Missing,
                });
            }
        }

        Table::from_parts(columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn string_frame_keeps_nulls_apart_from_empty_text() {
        let df = DataFrame::new(vec![
            Series::new("name".into(), [Some("a"), None, Some("")]).into_column(),
            Series::new("value".into(), [Some(1.5), Some(2.0), None]).into_column(),
        ])
        .unwrap();

        let table = Table::from_string_frame(&df).unwrap();

        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["name", "value"]);
        assert_eq!(table.cell(1, 0), Some(&CellValue::Missing));
        assert_eq!(table.cell(2, 0), Some(&CellValue::text("")));
        assert_eq!(table.cell(0, 1), Some(&CellValue::text("1.5")));
        assert_eq!(table.cell(2, 1), Some(&CellValue::Missing));
    }
}

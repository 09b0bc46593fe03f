//! Per-column statistics.

use std::collections::HashSet;

use orbis_model::{CellValue, ColumnType, ProfileRecord, Table, fraction, round_fraction};

/// Default number of sample values kept for text columns.
pub const DEFAULT_SAMPLE_VALUES: usize = 5;

/// Profiles every column of `table`, in column order.
pub fn profile_table(table: &Table, sample_values: usize) -> Vec<ProfileRecord> {
    let records: Vec<ProfileRecord> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            profile_column(
                &column.name,
                column.dtype,
                table.column_values(idx),
                sample_values,
            )
        })
        .collect();
    tracing::debug!(columns = records.len(), "profiled columns");
    records
}

fn profile_column<'a>(
    name: &str,
    dtype: ColumnType,
    cells: impl Iterator<Item = &'a CellValue>,
    sample_values: usize,
) -> ProfileRecord {
    let mut count = 0usize;
    let mut null_count = 0usize;
    let mut distinct = HashSet::new();
    let mut numbers = Vec::new();
    let mut samples = Vec::new();

    for cell in cells {
        count += 1;
        if cell.is_missing() {
            null_count += 1;
            continue;
        }
        let first_seen = distinct.insert(cell.dedup_key());
        match cell {
            CellValue::Number(value) => numbers.push(*value),
            CellValue::Text(text) if first_seen && samples.len() < sample_values => {
                samples.push(text.clone());
            }
            _ => {}
        }
    }

    let stats = (dtype == ColumnType::Numeric)
        .then(|| NumericStats::compute(&numbers))
        .flatten();

    ProfileRecord {
        column_name: name.to_string(),
        dtype,
        count,
        non_null_count: count - null_count,
        null_count,
        null_pct: round_fraction(fraction(null_count, count)),
        num_unique: distinct.len(),
        min: stats.map(|s| s.min),
        max: stats.map(|s| s.max),
        mean: stats.map(|s| s.mean),
        std: stats.and_then(|s| s.std),
        sample_values: if dtype == ColumnType::Text {
            samples
        } else {
            Vec::new()
        },
    }
}

#[derive(Debug, Clone, Copy)]
struct NumericStats {
    min: f64,
    max: f64,
    mean: f64,
    std: Option<f64>,
}

impl NumericStats {
    fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / n;
        // sample standard deviation (n - 1)
        let std = (values.len() >= 2).then(|| {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sum_sq / (n - 1.0)).sqrt()
        });
        Some(Self {
            min,
            max,
            mean,
            std,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbis_model::Column;

    fn numeric_table(values: &[Option<f64>]) -> Table {
        Table::from_parts(
            vec![Column::numeric("x")],
            values
                .iter()
                .map(|v| vec![v.map_or(CellValue::Missing, CellValue::Number)])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn profiles_numeric_column() {
        let table = numeric_table(&[Some(1.0), Some(2.0), Some(3.0), None]);

        let record = &profile_table(&table, DEFAULT_SAMPLE_VALUES)[0];

        assert_eq!(record.count, 4);
        assert_eq!(record.non_null_count, 3);
        assert_eq!(record.null_count, 1);
        assert_eq!(record.null_pct, 0.25);
        assert_eq!(record.num_unique, 3);
        assert_eq!(record.min, Some(1.0));
        assert_eq!(record.max, Some(3.0));
        assert_eq!(record.mean, Some(2.0));
        assert_eq!(record.std, Some(1.0));
        assert!(record.sample_values.is_empty());
    }

    #[test]
    fn single_value_has_no_std() {
        let table = numeric_table(&[Some(4.0), None]);
        let record = &profile_table(&table, DEFAULT_SAMPLE_VALUES)[0];
        assert_eq!(record.mean, Some(4.0));
        assert_eq!(record.std, None);
    }

    #[test]
    fn all_missing_numeric_has_no_stats() {
        let table = numeric_table(&[None, None]);
        let record = &profile_table(&table, DEFAULT_SAMPLE_VALUES)[0];
        assert_eq!(record.null_pct, 1.0);
        assert_eq!(record.min, None);
        assert_eq!(record.mean, None);
    }

    #[test]
    fn empty_table_has_zero_null_pct() {
        let table = numeric_table(&[]);
        let record = &profile_table(&table, DEFAULT_SAMPLE_VALUES)[0];
        assert_eq!(record.count, 0);
        assert_eq!(record.null_pct, 0.0);
    }

    #[test]
    fn text_column_keeps_first_distinct_samples() {
        let table = Table::from_parts(
            vec![Column::text("state")],
            ["TX", "CA", "TX", "NY"]
                .iter()
                .map(|v| vec![CellValue::text(*v)])
                .collect(),
        )
        .unwrap();
        let record = &profile_table(&table, 2)[0];
        assert_eq!(record.num_unique, 3);
        assert_eq!(record.sample_values, vec!["TX", "CA"]);
        assert_eq!(record.min, None);
    }
}

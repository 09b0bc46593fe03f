//! CSV writers for tables and validation reports.

use std::path::Path;

use csv::Writer;

use orbis_model::{CellValue, IssueRecord, ProfileRecord, Table, format_numeric};

use crate::error::{OutputError, Result};

/// Header of the per-column profile report.
pub const PROFILE_HEADER: [&str; 12] = [
    "column_name",
    "dtype",
    "count",
    "non_null_count",
    "null_count",
    "null_pct",
    "num_unique",
    "min",
    "max",
    "mean",
    "std",
    "sample_values",
];

/// Header of the issue report.
pub const ISSUE_HEADER: [&str; 5] = ["issue_type", "column", "count", "pct", "details"];

const SAMPLE_SEPARATOR: &str = ", ";

/// Writes `table` with a header row. Missing cells are written as empty fields.
pub fn write_table_csv(path: &Path, table: &Table) -> Result<()> {
    let mut writer = create_writer(path)?;
    write_record(&mut writer, path, table.column_names())?;
    for row in table.rows() {
        write_record(&mut writer, path, row.iter().map(cell_field))?;
    }
    finish(writer, path)?;
    tracing::debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "wrote table"
    );
    Ok(())
}

/// Writes one row per profiled column. Numeric statistics are empty for text columns.
pub fn write_profiles_csv(path: &Path, profiles: &[ProfileRecord]) -> Result<()> {
    let mut writer = create_writer(path)?;
    write_record(&mut writer, path, PROFILE_HEADER)?;
    for profile in profiles {
        let fields = [
            profile.column_name.clone(),
            profile.dtype.as_str().to_string(),
            profile.count.to_string(),
            profile.non_null_count.to_string(),
            profile.null_count.to_string(),
            format_numeric(profile.null_pct),
            profile.num_unique.to_string(),
            optional_number(profile.min),
            optional_number(profile.max),
            optional_number(profile.mean),
            optional_number(profile.std),
            profile.sample_values.join(SAMPLE_SEPARATOR),
        ];
        write_record(&mut writer, path, fields)?;
    }
    finish(writer, path)
}

/// Writes one row per issue, in detection order.
pub fn write_issues_csv(path: &Path, issues: &[IssueRecord]) -> Result<()> {
    let mut writer = create_writer(path)?;
    write_record(&mut writer, path, ISSUE_HEADER)?;
    for issue in issues {
        let fields = [
            issue.issue_type.as_str().to_string(),
            issue.column.clone(),
            issue.count.to_string(),
            format_numeric(issue.pct),
            issue.details.clone(),
        ];
        write_record(&mut writer, path, fields)?;
    }
    finish(writer, path)
}

fn cell_field(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(text) => text.clone(),
        CellValue::Number(value) => format_numeric(*value),
        CellValue::Missing => String::new(),
    }
}

fn optional_number(value: Option<f64>) -> String {
    value.map(format_numeric).unwrap_or_default()
}

fn create_writer(path: &Path) -> Result<Writer<std::fs::File>> {
    Writer::from_path(path).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

fn write_record<I, T>(writer: &mut Writer<std::fs::File>, path: &Path, record: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    writer
        .write_record(record)
        .map_err(|source| OutputError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

fn finish(mut writer: Writer<std::fs::File>, path: &Path) -> Result<()> {
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

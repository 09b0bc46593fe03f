//! Export of a run into a DuckDB database.
//!
//! Every run gets its own `orbis_cleaned_<run_id>` table and the
//! `orbis_cleaned` view is repointed at the newest one. Issues and run
//! summaries accumulate in shared tables keyed by `run_id`.
//!
//! Cleaned rows are tagged in a leading `_run_id` column. Canonical column
//! names never start with `_`, so the tag cannot clash with a data column.

use std::path::Path;

use duckdb::types::Value;
use duckdb::{Connection, appender_params_from_iter, params};

use orbis_model::{CellValue, ColumnType, Run};

use crate::error::{OutputError, Result};

const CLEANED_VIEW: &str = "orbis_cleaned";
const ISSUES_TABLE: &str = "orbis_validation_issues";
const RUNS_TABLE: &str = "orbis_runs";
const RUN_TAG_COLUMN: &str = "_run_id";

/// Appends `run` to the database at `db_path`, creating it if needed.
pub fn export_to_duckdb(db_path: &Path, run: &Run) -> Result<()> {
    let db_err = |source: duckdb::Error| OutputError::Database {
        path: db_path.to_path_buf(),
        source,
    };

    let mut conn = Connection::open(db_path).map_err(db_err)?;
    create_shared_tables(&conn).map_err(db_err)?;

    let tx = conn.transaction().map_err(db_err)?;
    let table = cleaned_table_name(run);
    write_cleaned(&tx, &table, run).map_err(db_err)?;
    tx.execute_batch(&format!(
        "CREATE OR REPLACE VIEW {CLEANED_VIEW} AS SELECT * FROM {}",
        quote_ident(&table)
    ))
    .map_err(db_err)?;
    write_issues(&tx, run).map_err(db_err)?;
    write_run_row(&tx, run).map_err(db_err)?;
    tx.commit().map_err(db_err)?;

    tracing::info!(
        path = %db_path.display(),
        table = %table,
        rows = run.cleaned().row_count(),
        "exported run to DuckDB"
    );
    Ok(())
}

fn cleaned_table_name(run: &Run) -> String {
    format!("{CLEANED_VIEW}_{}", run.id())
}

fn create_shared_tables(conn: &Connection) -> duckdb::Result<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {ISSUES_TABLE} (
            run_id VARCHAR NOT NULL,
            issue_type VARCHAR NOT NULL,
            \"column\" VARCHAR NOT NULL,
            count BIGINT NOT NULL,
            pct DOUBLE NOT NULL,
            details VARCHAR NOT NULL
        );
        CREATE TABLE IF NOT EXISTS {RUNS_TABLE} (
            run_id VARCHAR PRIMARY KEY,
            started_at VARCHAR NOT NULL,
            finished_at VARCHAR NOT NULL,
            input_dir VARCHAR NOT NULL,
            sources VARCHAR NOT NULL,
            merged_rows BIGINT NOT NULL,
            cleaned_rows BIGINT NOT NULL,
            duplicates_removed BIGINT NOT NULL,
            issue_count BIGINT NOT NULL
        );"
    ))
}

fn write_cleaned(conn: &Connection, table: &str, run: &Run) -> duckdb::Result<()> {
    let cleaned = run.cleaned();
    let mut definitions = vec![format!("{RUN_TAG_COLUMN} VARCHAR NOT NULL")];
    definitions.extend(cleaned.columns().iter().map(|column| {
        let sql_type = match column.dtype {
            ColumnType::Numeric => "DOUBLE",
            ColumnType::Text => "VARCHAR",
        };
        format!("{} {sql_type}", quote_ident(&column.name))
    }));
    conn.execute_batch(&format!(
        "CREATE TABLE {} ({})",
        quote_ident(table),
        definitions.join(", ")
    ))?;

    let run_id = run.id().to_string();
    let mut appender = conn.appender(table)?;
    for row in cleaned.rows() {
        let values = std::iter::once(Value::Text(run_id.clone())).chain(row.iter().map(cell_value));
        appender.append_row(appender_params_from_iter(values))?;
    }
    appender.flush()
}

fn write_issues(conn: &Connection, run: &Run) -> duckdb::Result<()> {
    let mut stmt = conn.prepare(&format!(
        "INSERT INTO {ISSUES_TABLE} VALUES (?, ?, ?, ?, ?, ?)"
    ))?;
    let run_id = run.id().as_str();
    for issue in run.issues() {
        stmt.execute(params![
            run_id,
            issue.issue_type.as_str(),
            issue.column,
            to_bigint(issue.count),
            issue.pct,
            issue.details,
        ])?;
    }
    Ok(())
}

fn write_run_row(conn: &Connection, run: &Run) -> duckdb::Result<()> {
    let metadata = run.metadata();
    conn.execute(
        &format!("INSERT INTO {RUNS_TABLE} VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"),
        params![
            metadata.run_id.as_str(),
            metadata.started_at.to_rfc3339(),
            metadata.finished_at.to_rfc3339(),
            metadata.input_dir.display().to_string(),
            metadata.sources.join(";"),
            to_bigint(metadata.merged_rows),
            to_bigint(metadata.cleaned_rows),
            to_bigint(metadata.duplicates_removed),
            to_bigint(metadata.issue_count),
        ],
    )?;
    Ok(())
}

fn cell_value(cell: &CellValue) -> Value {
    match cell {
        CellValue::Text(text) => Value::Text(text.clone()),
        CellValue::Number(value) => Value::Double(*value),
        CellValue::Missing => Value::Null,
    }
}

fn to_bigint(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("tons"), "\"tons\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}

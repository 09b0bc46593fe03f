//! The cleaning pass over one merged table.

use std::time::Instant;

use tracing::{debug, info};

use orbis_model::{CoercionDecision, ColumnDescriptor, Table};

use crate::coerce::{CoercionConfig, coerce_columns};
use crate::error::{CleanError, Result};
use crate::normalize::normalize_columns;
use crate::sanitize::sanitize;

/// Result of cleaning a table.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub table: Table,
    /// Raw to canonical name mapping, in input column order.
    pub descriptors: Vec<ColumnDescriptor>,
    pub coercions: Vec<CoercionDecision>,
    pub dropped_columns: Vec<String>,
    pub duplicates_removed: usize,
}

impl CleanOutcome {
    pub fn coerced_columns(&self) -> impl Iterator<Item = &str> {
        self.coercions
            .iter()
            .filter(|decision| decision.coerced)
            .map(|decision| decision.column.as_str())
    }
}

/// Runs the normalizer, the type coercer and the row sanitizer, in that order.
///
/// The input is left untouched. A table without columns is rejected with
/// [`CleanError::NoColumns`].
pub fn clean_table(table: &Table, config: &CoercionConfig) -> Result<CleanOutcome> {
    if table.column_count() == 0 {
        return Err(CleanError::NoColumns);
    }
    let start = Instant::now();

    let raw_names: Vec<&str> = table.column_names().collect();
    let descriptors = normalize_columns(&raw_names);
    let canonical: Vec<String> = descriptors
        .iter()
        .map(|descriptor| descriptor.canonical_name.clone())
        .collect();
    let renamed = table.rename_columns(&canonical)?;
    debug!(columns = renamed.column_count(), "normalized column names");

    let (coerced, coercions) = coerce_columns(&renamed, config)?;
    let coerced_count = coercions.iter().filter(|decision| decision.coerced).count();
    debug!(coerced_columns = coerced_count, "coerced numeric columns");

    let (sanitized, stats) = sanitize(&coerced)?;

    info!(
        input_rows = table.row_count(),
        input_columns = table.column_count(),
        rows = sanitized.row_count(),
        columns = sanitized.column_count(),
        coerced_columns = coerced_count,
        duplicates_removed = stats.duplicates_removed,
        duration_ms = start.elapsed().as_millis(),
        "cleaning complete"
    );

    Ok(CleanOutcome {
        table: sanitized,
        descriptors,
        coercions,
        dropped_columns: stats.dropped_columns,
        duplicates_removed: stats.duplicates_removed,
    })
}

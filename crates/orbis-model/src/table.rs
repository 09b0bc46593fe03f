use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::numeric::format_numeric;

/// A single cell. `Missing` is distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Key used for equality in distinct counts and row deduplication.
    ///
    /// Numbers compare by value, so `-0.0` and `0.0` share a key.
    pub fn dedup_key(&self) -> CellKey<'_> {
        match self {
            Self::Text(value) => CellKey::Text(value),
            Self::Number(value) => {
                let normalized = if *value == 0.0 { 0.0 } else { *value };
                CellKey::Number(normalized.to_bits())
            }
            Self::Missing => CellKey::Missing,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => f.write_str(&format_numeric(*value)),
            Self::Missing => Ok(()),
        }
    }
}

/// Hashable view of a [`CellValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey<'a> {
    Text(&'a str),
    Number(u64),
    Missing,
}

/// Column storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Numeric,
}

impl ColumnType {
    /// Label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Numeric => "numeric",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
}

impl Column {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: ColumnType::Text,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: ColumnType::Numeric,
        }
    }
}

/// Raw label paired with its canonical identifier. Frozen once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub raw_name: String,
    pub canonical_name: String,
}

/// An ordered set of uniquely named columns plus rows aligned with them.
///
/// Tables are treated as values: cleaning stages build new tables instead of
/// editing their input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        ensure_unique(columns.iter().map(|column| column.name.as_str()))?;
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Builds an empty table whose columns are all text.
    pub fn with_text_columns<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Column::text).collect())
    }

    /// Builds a table from columns and rows, checking every invariant.
    pub fn from_parts(columns: Vec<Column>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut table = Self::new(columns)?;
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ModelError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Iterates the cells of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Returns a copy of the table with its columns renamed positionally.
    pub fn rename_columns(&self, names: &[String]) -> Result<Self> {
        if names.len() != self.columns.len() {
            return Err(ModelError::RenameWidth {
                expected: self.columns.len(),
                found: names.len(),
            });
        }
        ensure_unique(names.iter().map(String::as_str))?;
        let columns = self
            .columns
            .iter()
            .zip(names)
            .map(|(column, name)| Column {
                name: name.clone(),
                dtype: column.dtype,
            })
            .collect();
        Ok(Self {
            columns,
            rows: self.rows.clone(),
        })
    }
}

fn ensure_unique<'a>(names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ModelError::DuplicateColumn(name.to_string()));
        }
    }
    Ok(())
}

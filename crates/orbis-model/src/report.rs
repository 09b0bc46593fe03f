//! Records produced by the profiler and the issue detector.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::ColumnType;

/// Decimal places kept for ratios in reports.
pub const FRACTION_PLACES: i32 = 6;

/// Rounds a ratio to [`FRACTION_PLACES`] decimals.
pub fn round_fraction(value: f64) -> f64 {
    let scale = 10f64.powi(FRACTION_PLACES);
    (value * scale).round() / scale
}

/// Per-column statistics over the cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub column_name: String,
    pub dtype: ColumnType,
    /// Total rows in the table.
    pub count: usize,
    pub non_null_count: usize,
    pub null_count: usize,
    pub null_pct: f64,
    /// Distinct non-missing values.
    pub num_unique: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    /// Sample standard deviation; absent with fewer than two values.
    pub std: Option<f64>,
    /// First distinct text values in row order. Empty for numeric columns.
    #[serde(default)]
    pub sample_values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    HighNullRate,
    ConstantColumn,
    MixedTypeSuspect,
    DuplicateRowsRemoved,
    NegativeValues,
    SourceFileMissing,
    SourceFileNull,
    SourceFileInvalid,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighNullRate => "high_null_rate",
            Self::ConstantColumn => "constant_column",
            Self::MixedTypeSuspect => "mixed_type_suspect",
            Self::DuplicateRowsRemoved => "duplicate_rows_removed",
            Self::NegativeValues => "negative_values",
            Self::SourceFileMissing => "source_file_missing",
            Self::SourceFileNull => "source_file_null",
            Self::SourceFileInvalid => "source_file_invalid",
        }
    }

    /// Whether the issue describes the table as a whole rather than one column.
    pub fn is_table_level(&self) -> bool {
        matches!(self, Self::DuplicateRowsRemoved)
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One data-quality finding. Findings are report content, never errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub issue_type: IssueType,
    /// Empty for table-level issues.
    pub column: String,
    pub count: usize,
    pub pct: f64,
    pub details: String,
}

impl IssueRecord {
    pub fn column(
        issue_type: IssueType,
        column: impl Into<String>,
        count: usize,
        pct: f64,
        details: impl Into<String>,
    ) -> Self {
        Self {
            issue_type,
            column: column.into(),
            count,
            pct: round_fraction(pct),
            details: details.into(),
        }
    }

    pub fn table(
        issue_type: IssueType,
        count: usize,
        pct: f64,
        details: impl Into<String>,
    ) -> Self {
        Self::column(issue_type, String::new(), count, pct, details)
    }
}

/// Ratio helper returning 0 for an empty denominator.
pub fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_six_places() {
        assert_eq!(round_fraction(1.0 / 3.0), 0.333333);
        assert_eq!(round_fraction(0.25), 0.25);
    }

    #[test]
    fn fraction_of_empty_is_zero() {
        assert_eq!(fraction(0, 0), 0.0);
        assert_eq!(fraction(1, 4), 0.25);
    }

    #[test]
    fn issue_type_labels_match_serde() {
        let json = serde_json::to_string(&IssueType::MixedTypeSuspect).unwrap();
        assert_eq!(json, "\"mixed_type_suspect\"");
        assert_eq!(IssueType::MixedTypeSuspect.as_str(), "mixed_type_suspect");
    }
}

use serde::{Deserialize, Serialize};

use crate::profile::DEFAULT_SAMPLE_VALUES;

pub const DEFAULT_NULL_RATE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_MIXED_TYPE_THRESHOLD: f64 = 0.5;

/// Thresholds and switches for profiling and issue detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// A column is flagged when its null rate strictly exceeds this.
    pub null_rate_threshold: f64,
    /// Lower bound (exclusive) of the parseable share flagged as mixed type.
    pub mixed_type_threshold: f64,
    /// Distinct text values kept per column in the profile.
    pub sample_values: usize,
    pub checks: CheckToggles,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            null_rate_threshold: DEFAULT_NULL_RATE_THRESHOLD,
            mixed_type_threshold: DEFAULT_MIXED_TYPE_THRESHOLD,
            sample_values: DEFAULT_SAMPLE_VALUES,
            checks: CheckToggles::default(),
        }
    }
}

/// Enables individual checks. Duplicate rows are always reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckToggles {
    pub high_null_rate: bool,
    pub constant_column: bool,
    pub mixed_type_suspect: bool,
    pub negative_values: bool,
    pub provenance: bool,
}

impl Default for CheckToggles {
    fn default() -> Self {
        Self {
            high_null_rate: true,
            constant_column: true,
            mixed_type_suspect: true,
            negative_values: true,
            provenance: true,
        }
    }
}

//! Profiling and issue detection over a cleaned table.
//!
//! Both analyses are pure functions of their inputs and may run concurrently
//! on the same table.
//!
//! - [`profile_table`]: one [`ProfileRecord`](orbis_model::ProfileRecord) per column
//! - [`detect_issues`]: [`IssueRecord`](orbis_model::IssueRecord)s for
//!   high null rates, constant columns, mixed-type text, negative values,
//!   provenance problems and removed duplicates
//!
//! # Example
//!
//! ```ignore
//! use orbis_validate::{DetectorInput, ValidationConfig, detect_issues, profile_table};
//!
//! let config = ValidationConfig::default();
//! let profiles = profile_table(&cleaned, config.sample_values);
//! let issues = detect_issues(&input, &config);
//! ```

pub mod checks;
mod config;
mod profile;

use orbis_model::IssueRecord;

pub use checks::DetectorInput;
pub use config::{
    CheckToggles, DEFAULT_MIXED_TYPE_THRESHOLD, DEFAULT_NULL_RATE_THRESHOLD, ValidationConfig,
};
pub use profile::{DEFAULT_SAMPLE_VALUES, profile_table};

/// Runs all enabled checks against the cleaned table.
pub fn detect_issues(input: &DetectorInput<'_>, config: &ValidationConfig) -> Vec<IssueRecord> {
    checks::run_all(input, config)
}

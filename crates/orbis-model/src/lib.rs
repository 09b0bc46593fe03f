//! Core data types for the Orbis merge, clean and validate pipeline.
//!
//! - [`Table`] and [`CellValue`]: the in-memory tabular model, with `Missing`
//!   kept distinct from the empty string
//! - [`ProfileRecord`] and [`IssueRecord`]: the two validation report shapes
//! - [`RunId`], [`RunMetadata`] and [`Run`]: identity and record of one execution
//! - [`parse_numeric`]: the numeric grammar shared by type coercion and validation

pub mod artifact;
pub mod error;
mod frame;
pub mod numeric;
pub mod redact;
pub mod report;
pub mod run;
pub mod table;

pub use error::{ModelError, Result, StructuralError};
pub use numeric::{CoercionDecision, NumericEvidence, format_numeric, is_numeric, parse_numeric};
pub use report::{
    FRACTION_PLACES, IssueRecord, IssueType, ProfileRecord, fraction, round_fraction,
};
pub use run::{Run, RunArtifacts, RunId, RunMetadata, RunParts};
pub use table::{CellKey, CellValue, Column, ColumnDescriptor, ColumnType, Table};

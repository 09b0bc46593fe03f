//! Error types for the cleaning pass.

use thiserror::Error;

use orbis_model::ModelError;

#[derive(Debug, Error)]
pub enum CleanError {
    /// A table with no columns cannot be cleaned.
    #[error("cannot clean a table with no columns")]
    NoColumns,

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, CleanError>;

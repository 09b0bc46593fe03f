use thiserror::Error;

/// Errors raised when a table or identifier would break its invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    #[error("row has {found} cells, table has {expected} columns")]
    RowWidth { expected: usize, found: usize },
    #[error("rename expects {expected} names, got {found}")]
    RenameWidth { expected: usize, found: usize },
    #[error("invalid run id: {0}")]
    InvalidRunId(String),
    #[error("DataFrame operation failed: {0}")]
    Frame(String),
}

/// Conditions that make a run meaningless. The run aborts before any artifact
/// is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructuralError {
    #[error("no input tables to merge")]
    NoInputs,
    #[error("input tables contain no columns")]
    NoColumns,
}

pub type Result<T> = std::result::Result<T, ModelError>;

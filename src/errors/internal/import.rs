use thiserror::Error;

/// Batch-level import failures
///
/// Per-row validation problems are not errors; they are collected into the
/// import report instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Please upload a CSV file. Excel files (.xlsx) should be saved as CSV first. Got: {0}")]
    UnsupportedFileType(String),

    #[error("File must contain at least a header row and one data row")]
    NotEnoughRows,
}

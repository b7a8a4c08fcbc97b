//! Error types for decomposition, storage and truncation.

use thiserror::Error;

use crate::matrix::MatrixShapeError;
use crate::store::RecordId;

/// Errors raised by the decomposition engines, the record stores and the truncation views.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DecompositionError {
    /// The submitted matrix is malformed or too small for the requested analysis.
    #[error("Invalid matrix data: {0}")]
    InvalidInput(#[from] MatrixShapeError),

    /// The rank parameter is present but is not a positive integer.
    #[error("Invalid rank parameter {0:?}. Must be a positive integer.")]
    InvalidRank(String),

    /// No record is stored under the identifier.
    #[error("no record stored under id {0}")]
    NotFound(RecordId),

    /// The linear algebra backend failed.
    #[error("linear algebra backend error: {0}")]
    Backend(String),
}

/// Result type for decomposition operations.
pub type Result<T> = std::result::Result<T, DecompositionError>;

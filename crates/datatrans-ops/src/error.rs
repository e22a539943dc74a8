use datatrans_tensor::TensorError;
use thiserror::Error;

/// An error type for the array operations.
#[derive(Error, Debug, PartialEq)]
pub enum OpsError {
    /// Input rows do not all have the same length.
    #[error("Shape mismatch: row {row} has {actual} elements, expected {expected}")]
    ShapeMismatch {
        /// Index of the first offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        actual: usize,
    },

    /// A size, shift or stride parameter is below 1.
    #[error("Invalid parameter: {name} must be >= 1, got {value}")]
    InvalidParameter {
        /// Name of the parameter
        name: &'static str,
        /// Value that was passed
        value: usize,
    },

    /// The operation needs at least one row and one column.
    #[error("Empty input: {0} must have at least one row and one column")]
    EmptyInput(&'static str),

    /// Tensor error
    #[error("Error with the tensor: {0}")]
    TensorError(TensorError),
}

impl From<TensorError> for OpsError {
    fn from(e: TensorError) -> Self {
        match e {
            TensorError::RaggedRows {
                row,
                expected,
                actual,
            } => OpsError::ShapeMismatch {
                row,
                expected,
                actual,
            },
            e => OpsError::TensorError(e),
        }
    }
}

// Rejects parameters that must be at least one.
pub(crate) fn check_positive(name: &'static str, value: usize) -> Result<(), OpsError> {
    if value == 0 {
        return Err(OpsError::InvalidParameter { name, value });
    }
    Ok(())
}

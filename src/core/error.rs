//! Crate-wide error type
//!
//! Input problems are reported before the solver starts. Numerical
//! degeneracy inside a pair update is ordinary control flow and never
//! surfaces here; running out of passes does.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SVMError {
    /// Out-of-range C, tolerance, pass cap, kernel parameter or format name
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Too few examples, zero-width rows or non-finite features
    #[error("Invalid training set: {0}")]
    InvalidDataset(String),

    /// Class labels are exactly +1 or -1
    #[error("Invalid label {0}: class labels must be +1 or -1")]
    InvalidLabel(f64),

    /// A row or query point whose width differs from the expected one
    #[error("Expected {expected} features, found {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("No examples found")]
    EmptyDataset,

    /// The outer loop reached its pass cap with KKT violations left
    #[error("SMO did not converge within {iterations} passes")]
    NotConverged { iterations: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed data line, with its line number when known
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Model file could not be encoded or decoded
    #[error("Model serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, SVMError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SVMError::InvalidLabel(2.0).to_string(),
            "Invalid label 2: class labels must be +1 or -1"
        );
        assert_eq!(
            SVMError::DimensionMismatch {
                expected: 3,
                actual: 5
            }
            .to_string(),
            "Expected 3 features, found 5"
        );
        assert_eq!(
            SVMError::NotConverged { iterations: 10 }.to_string(),
            "SMO did not converge within 10 passes"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        fn open() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/nonexistent/smo-svm/model.json")?)
        }
        assert!(matches!(open(), Err(SVMError::IoError(_))));
    }
}

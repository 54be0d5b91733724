//! Error types for preprocessing operations.

use thiserror::Error;

/// Error type for preprocessing operations.
#[derive(Error, Debug)]
pub enum PreprocessingError {
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A declared column is not present in the input table.
    #[error("Missing column: `{0}`")]
    MissingColumn(String),

    /// A cell could not be converted to the type its column requires.
    #[error("Invalid value `{value}` in column `{column}` at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    /// A category not seen during fit, with unknown categories set to error.
    #[error("Unknown category `{value}` in feature {feature}")]
    UnknownCategory { feature: usize, value: String },

    /// Feature dimension mismatch.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },

    /// Invalid hyperparameter value or inconsistent configuration.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<ndarray::ShapeError> for PreprocessingError {
    fn from(err: ndarray::ShapeError) -> Self {
        PreprocessingError::InvalidParameter(err.to_string())
    }
}

use fraudnet_core::MatrixError;
use thiserror::Error;

/// Errors raised by scaling, splitting and oversampling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PreprocessError {
    #[error("Scaler used before fit()")]
    NotFitted,

    #[error("Labels must be binary (0/1), found label {0}")]
    NonBinaryLabel(i64),

    #[error("Minority class has {0} samples; SMOTE needs at least 2")]
    TooFewMinoritySamples(usize),

    #[error("Feature rows ({x_rows}) do not match label count ({y_len})")]
    LengthMismatch { x_rows: usize, y_len: usize },

    #[error("Test ratio {0} must be in (0, 1)")]
    BadTestRatio(f64),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub type PreprocessResult<T> = Result<T, PreprocessError>;

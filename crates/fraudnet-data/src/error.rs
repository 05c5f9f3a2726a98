use fraudnet_core::MatrixError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or reshaping tabular data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Dataset not found at {0}")]
    FileNotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Non-numeric value {value:?} at row {row}, column {column}")]
    BadValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("No column named {0:?}")]
    MissingColumn(String),

    #[error("{headers} headers do not match {cols} data columns")]
    HeaderMismatch { headers: usize, cols: usize },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub type DataResult<T> = Result<T, DataError>;

use thiserror::Error;

/// Core error type for all matrix operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("Row index {index} out of bounds for matrix with {rows} rows")]
    RowOutOfBounds { index: usize, rows: usize },

    #[error("Column index {index} out of bounds for matrix with {cols} columns")]
    ColOutOfBounds { index: usize, cols: usize },

    #[error("Inner dimensions must match for matmul: {left} and {right}")]
    InnerDimMismatch { left: usize, right: usize },

    #[error("Data length {len} does not fill a {rows}x{cols} matrix")]
    DataLength {
        len: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Ragged rows: row {row} has {got} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("Empty matrix")]
    EmptyMatrix,
}

pub type MatrixResult<T> = Result<T, MatrixError>;

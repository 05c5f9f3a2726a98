pub mod error;
pub mod matrix;

pub use error::{MatrixError, MatrixResult};
pub use matrix::Matrix;

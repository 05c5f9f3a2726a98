use crate::error::{MatrixError, MatrixResult};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense 2-D matrix of `f64` — the fundamental data structure of FraudNet.
///
/// Stores data in a flat contiguous `Vec<f64>` with row-major layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

// ─── Construction ───────────────────────────────────────────────────────────

impl Matrix {
    /// Create a matrix from raw row-major data.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> MatrixResult<Self> {
        if data.len() != rows * cols {
            return Err(MatrixError::DataLength {
                len: data.len(),
                rows,
                cols,
            });
        }
        Ok(Matrix { data, rows, cols })
    }

    /// Create a matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a matrix from nested rows. All rows must have equal length.
    pub fn from_rows(rows: &[Vec<f64>]) -> MatrixResult<Self> {
        if rows.is_empty() {
            return Ok(Matrix::zeros(0, 0));
        }
        let cols = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row: i,
                    got: row.len(),
                    expected: cols,
                });
            }
        }
        let data: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Matrix::new(data, rows.len(), cols)
    }

    /// A single-row matrix from a slice.
    pub fn row_vector(data: &[f64]) -> Self {
        Matrix {
            data: data.to_vec(),
            rows: 1,
            cols: data.len(),
        }
    }

    /// A single-column matrix from a slice.
    pub fn col_vector(data: &[f64]) -> Self {
        Matrix {
            data: data.to_vec(),
            rows: data.len(),
            cols: 1,
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checked element access.
    pub fn get(&self, i: usize, j: usize) -> MatrixResult<f64> {
        if i >= self.rows {
            return Err(MatrixError::RowOutOfBounds {
                index: i,
                rows: self.rows,
            });
        }
        if j >= self.cols {
            return Err(MatrixError::ColOutOfBounds {
                index: j,
                cols: self.cols,
            });
        }
        Ok(self.data[i * self.cols + j])
    }

    /// Checked element write.
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> MatrixResult<()> {
        if i >= self.rows {
            return Err(MatrixError::RowOutOfBounds {
                index: i,
                rows: self.rows,
            });
        }
        if j >= self.cols {
            return Err(MatrixError::ColOutOfBounds {
                index: j,
                cols: self.cols,
            });
        }
        self.data[i * self.cols + j] = value;
        Ok(())
    }

    /// Borrow row `i` as a slice.
    pub fn row(&self, i: usize) -> MatrixResult<&[f64]> {
        if i >= self.rows {
            return Err(MatrixError::RowOutOfBounds {
                index: i,
                rows: self.rows,
            });
        }
        let start = i * self.cols;
        Ok(&self.data[start..start + self.cols])
    }

    /// Copy column `j` out as a vector.
    pub fn col(&self, j: usize) -> MatrixResult<Vec<f64>> {
        if j >= self.cols {
            return Err(MatrixError::ColOutOfBounds {
                index: j,
                cols: self.cols,
            });
        }
        Ok((0..self.rows)
            .map(|i| self.data[i * self.cols + j])
            .collect())
    }

    // ─── Row assembly ───────────────────────────────────────────────────────

    /// Append a row in place.
    pub fn push_row(&mut self, row: &[f64]) -> MatrixResult<()> {
        if self.rows == 0 && self.cols == 0 {
            self.cols = row.len();
        }
        if row.len() != self.cols {
            return Err(MatrixError::RaggedRows {
                row: self.rows,
                got: row.len(),
                expected: self.cols,
            });
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    /// Gather the given rows into a new matrix, in index order.
    pub fn select_rows(&self, indices: &[usize]) -> MatrixResult<Matrix> {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &i in indices {
            data.extend_from_slice(self.row(i)?);
        }
        Matrix::new(data, indices.len(), self.cols)
    }

    /// Rows `[start..end)` as a new matrix.
    pub fn slice_rows(&self, start: usize, end: usize) -> MatrixResult<Matrix> {
        if end > self.rows || start > end {
            return Err(MatrixError::RowOutOfBounds {
                index: end,
                rows: self.rows,
            });
        }
        let data = self.data[start * self.cols..end * self.cols].to_vec();
        Matrix::new(data, end - start, self.cols)
    }

    /// Stack matrices vertically. All must share a column count.
    pub fn vstack(parts: &[&Matrix]) -> MatrixResult<Matrix> {
        let first = parts.first().ok_or(MatrixError::EmptyMatrix)?;
        let cols = first.cols;
        let mut data = Vec::new();
        let mut rows = 0;
        for p in parts {
            if p.cols != cols {
                return Err(MatrixError::ShapeMismatch {
                    expected: (p.rows, cols),
                    got: (p.rows, p.cols),
                });
            }
            data.extend_from_slice(&p.data);
            rows += p.rows;
        }
        Matrix::new(data, rows, cols)
    }

    /// Drop column `j`, returning a matrix one column narrower.
    pub fn drop_col(&self, j: usize) -> MatrixResult<Matrix> {
        if j >= self.cols {
            return Err(MatrixError::ColOutOfBounds {
                index: j,
                cols: self.cols,
            });
        }
        let mut data = Vec::with_capacity(self.rows * (self.cols - 1));
        for i in 0..self.rows {
            let row = &self.data[i * self.cols..(i + 1) * self.cols];
            data.extend_from_slice(&row[..j]);
            data.extend_from_slice(&row[j + 1..]);
        }
        Matrix::new(data, self.rows, self.cols - 1)
    }

    // ─── Element-wise operations ────────────────────────────────────────────

    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Matrix {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn map_mut<F: Fn(f64) -> f64>(&mut self, f: F) {
        for x in self.data.iter_mut() {
            *x = f(*x);
        }
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(&self, other: &Matrix, f: F) -> MatrixResult<Matrix> {
        if self.shape() != other.shape() {
            return Err(MatrixError::ShapeMismatch {
                expected: self.shape(),
                got: other.shape(),
            });
        }
        let data: Vec<f64> = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn add(&self, other: &Matrix) -> MatrixResult<Matrix> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn sub(&self, other: &Matrix) -> MatrixResult<Matrix> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Hadamard (element-wise) product.
    pub fn hadamard(&self, other: &Matrix) -> MatrixResult<Matrix> {
        self.zip_with(other, |a, b| a * b)
    }

    pub fn scale(&self, s: f64) -> Matrix {
        self.map(|x| x * s)
    }

    /// Add a `1 x cols` row vector to every row.
    pub fn add_row_vector(&self, bias: &Matrix) -> MatrixResult<Matrix> {
        if bias.rows != 1 || bias.cols != self.cols {
            return Err(MatrixError::ShapeMismatch {
                expected: (1, self.cols),
                got: bias.shape(),
            });
        }
        let mut out = self.clone();
        for i in 0..out.rows {
            for j in 0..out.cols {
                out.data[i * out.cols + j] += bias.data[j];
            }
        }
        Ok(out)
    }

    // ─── Linear algebra ─────────────────────────────────────────────────────

    /// Matrix multiply, row-parallel.
    pub fn matmul(&self, other: &Matrix) -> MatrixResult<Matrix> {
        if self.cols != other.rows {
            return Err(MatrixError::InnerDimMismatch {
                left: self.cols,
                right: other.rows,
            });
        }
        let (m, k, n) = (self.rows, self.cols, other.cols);
        let mut data = vec![0.0; m * n];
        data.par_chunks_mut(n).enumerate().for_each(|(i, out_row)| {
            for p in 0..k {
                let a = self.data[i * k + p];
                if a == 0.0 {
                    continue;
                }
                let b_row = &other.data[p * n..(p + 1) * n];
                for (o, &b) in out_row.iter_mut().zip(b_row.iter()) {
                    *o += a * b;
                }
            }
        });
        Matrix::new(data, m, n)
    }

    /// Transpose.
    pub fn t(&self) -> Matrix {
        let mut data = vec![0.0; self.data.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    // ─── Reductions ─────────────────────────────────────────────────────────

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.sum() / self.data.len() as f64
    }

    /// Mean of column `j`.
    pub fn col_mean(&self, j: usize) -> MatrixResult<f64> {
        if self.rows == 0 {
            return Err(MatrixError::EmptyMatrix);
        }
        let mut sum = 0.0;
        for i in 0..self.rows {
            sum += self.get(i, j)?;
        }
        Ok(sum / self.rows as f64)
    }

    /// Population standard deviation of column `j`.
    pub fn col_std(&self, j: usize) -> MatrixResult<f64> {
        let mean = self.col_mean(j)?;
        let mut acc = 0.0;
        for i in 0..self.rows {
            let d = self.get(i, j)? - mean;
            acc += d * d;
        }
        Ok((acc / self.rows as f64).sqrt())
    }

    /// Sum over rows, yielding a `1 x cols` row vector.
    pub fn sum_rows(&self) -> Matrix {
        let mut out = vec![0.0; self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                out[j] += self.data[i * self.cols + j];
            }
        }
        Matrix {
            data: out,
            rows: 1,
            cols: self.cols,
        }
    }
}

// ─── Display ────────────────────────────────────────────────────────────────

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "matrix([")?;
        for i in 0..self.rows.min(8) {
            write!(f, "  [")?;
            for j in 0..self.cols.min(8) {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}", self.data[i * self.cols + j])?;
            }
            if self.cols > 8 {
                write!(f, ", ...")?;
            }
            writeln!(f, "],")?;
        }
        if self.rows > 8 {
            writeln!(f, "  ...")?;
        }
        write!(f, "], shape=({}, {}))", self.rows, self.cols)
    }
}

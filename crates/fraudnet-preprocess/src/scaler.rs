use crate::error::{PreprocessError, PreprocessResult};
use fraudnet_core::Matrix;

/// Standardize features by removing the mean and scaling to unit variance.
///
/// Can be fitted over every column, or over a single column when only one
/// feature needs scaling (the pipeline standardizes `Amount` alone and
/// leaves the already-normalized PCA components as they are).
#[derive(Debug, Default)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std: Vec<f64>,
    columns: Option<Vec<usize>>,
    fitted: bool,
}

impl StandardScaler {
    pub fn new() -> Self {
        StandardScaler::default()
    }

    /// Compute per-column mean and population std over all columns.
    pub fn fit(&mut self, x: &Matrix) -> PreprocessResult<()> {
        self.fit_columns(x, &(0..x.cols()).collect::<Vec<_>>())
    }

    /// Fit statistics for a subset of columns only.
    pub fn fit_columns(&mut self, x: &Matrix, columns: &[usize]) -> PreprocessResult<()> {
        let mut mean = Vec::with_capacity(columns.len());
        let mut std = Vec::with_capacity(columns.len());
        for &j in columns {
            mean.push(x.col_mean(j)?);
            std.push(x.col_std(j)?);
        }
        self.mean = mean;
        self.std = std;
        self.columns = if columns.len() == x.cols() && columns.iter().enumerate().all(|(i, &j)| i == j)
        {
            None
        } else {
            Some(columns.to_vec())
        };
        self.fitted = true;
        Ok(())
    }

    /// Apply `(x - mean) / std` with the fitted statistics.
    /// A zero-variance column passes through unscaled.
    pub fn transform(&self, x: &Matrix) -> PreprocessResult<Matrix> {
        if !self.fitted {
            return Err(PreprocessError::NotFitted);
        }
        let mut out = x.clone();
        let columns: Vec<usize> = match &self.columns {
            Some(c) => c.clone(),
            None => (0..x.cols()).collect(),
        };
        for (k, &j) in columns.iter().enumerate() {
            let (mean, std) = (self.mean[k], self.std[k]);
            if std <= 0.0 {
                continue;
            }
            for i in 0..out.rows() {
                let v = out.get(i, j)?;
                out.set(i, j, (v - mean) / std)?;
            }
        }
        Ok(out)
    }

    pub fn fit_transform(&mut self, x: &Matrix) -> PreprocessResult<Matrix> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Fit and scale one column in place; the common single-feature path.
    pub fn fit_transform_column(&mut self, x: &mut Matrix, column: usize) -> PreprocessResult<()> {
        self.fit_columns(x, &[column])?;
        *x = self.transform(x)?;
        Ok(())
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn std(&self) -> &[f64] {
        &self.std
    }
}

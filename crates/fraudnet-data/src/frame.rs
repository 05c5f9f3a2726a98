use crate::error::{DataError, DataResult};
use fraudnet_core::Matrix;
use std::collections::BTreeMap;
use std::path::Path;

/// A tabular dataset: named columns over a dense numeric matrix.
///
/// Backs the pipeline's loader stage. All cells are parsed as `f64`;
/// a non-numeric cell is a hard error with its row/column position.
#[derive(Debug, Clone)]
pub struct Frame {
    headers: Vec<String>,
    data: Matrix,
}

impl Frame {
    /// Build a frame from parts. Header count must agree with the matrix
    /// width, except for a rowless matrix whose width is still unknown.
    pub fn new(headers: Vec<String>, data: Matrix) -> DataResult<Self> {
        if data.rows() > 0 && headers.len() != data.cols() {
            return Err(DataError::HeaderMismatch {
                headers: headers.len(),
                cols: data.cols(),
            });
        }
        Ok(Frame { headers, data })
    }

    /// Load a CSV file with a header row into a frame.
    ///
    /// A missing file is reported as `DataError::FileNotFound` instead of
    /// whatever the underlying reader would raise.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> DataResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.to_path_buf()));
        }

        let mut rdr = csv::Reader::from_path(path)?;
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

        let mut data = Matrix::zeros(0, 0);
        let mut row_buf = Vec::with_capacity(headers.len());
        for (row_idx, result) in rdr.records().enumerate() {
            let record = result?;
            row_buf.clear();
            for (col_idx, field) in record.iter().enumerate() {
                let value: f64 = field.trim().parse().map_err(|_| DataError::BadValue {
                    row: row_idx,
                    column: headers
                        .get(col_idx)
                        .cloned()
                        .unwrap_or_else(|| col_idx.to_string()),
                    value: field.to_string(),
                })?;
                row_buf.push(value);
            }
            data.push_row(&row_buf)?;
        }

        Ok(Frame { headers, data })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn matrix(&self) -> &Matrix {
        &self.data
    }

    pub fn into_matrix(self) -> Matrix {
        self.data
    }

    pub fn n_rows(&self) -> usize {
        self.data.rows()
    }

    pub fn n_cols(&self) -> usize {
        self.data.cols()
    }

    fn column_index(&self, name: &str) -> DataResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Copy a column out by name.
    pub fn column(&self, name: &str) -> DataResult<Vec<f64>> {
        let j = self.column_index(name)?;
        Ok(self.data.col(j)?)
    }

    /// Return a new frame without the named column.
    pub fn drop_column(&self, name: &str) -> DataResult<Frame> {
        let j = self.column_index(name)?;
        let mut headers = self.headers.clone();
        headers.remove(j);
        Ok(Frame {
            headers,
            data: self.data.drop_col(j)?,
        })
    }

    /// Count rows per integer label in the named column.
    pub fn class_counts(&self, name: &str) -> DataResult<BTreeMap<i64, usize>> {
        let labels = self.column(name)?;
        let mut counts = BTreeMap::new();
        for v in labels {
            *counts.entry(v.round() as i64).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Position of the named column, for callers that hand the matrix to
    /// column-indexed transforms.
    pub fn position(&self, name: &str) -> DataResult<usize> {
        self.column_index(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_from_csv() {
        let path = write_csv(
            "fraudnet_frame_basic.csv",
            "Time,Amount,Class\n0,10.5,0\n1,2.0,1\n2,7.25,0\n",
        );
        let frame = Frame::from_csv(&path).unwrap();
        assert_eq!(frame.n_rows(), 3);
        assert_eq!(frame.n_cols(), 3);
        assert_eq!(frame.headers(), &["Time", "Amount", "Class"]);
        assert_eq!(frame.column("Amount").unwrap(), vec![10.5, 2.0, 7.25]);
    }

    #[test]
    fn test_new_checks_header_width() {
        let data = Matrix::from_rows(&[vec![1.0, 2.0]]).unwrap();
        let frame = Frame::new(vec!["A".into(), "B".into()], data.clone()).unwrap();
        assert_eq!(frame.column("B").unwrap(), vec![2.0]);

        let err = Frame::new(vec!["A".into()], data).unwrap_err();
        assert!(matches!(
            err,
            DataError::HeaderMismatch { headers: 1, cols: 2 }
        ));

        // Header-only frames have no rows yet, so any width is fine.
        let empty = Frame::new(vec!["A".into(), "B".into()], Matrix::zeros(0, 0)).unwrap();
        assert_eq!(empty.n_rows(), 0);
    }

    #[test]
    fn test_missing_file() {
        let err = Frame::from_csv("/nonexistent/creditcard.csv").unwrap_err();
        assert!(matches!(err, DataError::FileNotFound(_)));
    }

    #[test]
    fn test_bad_value() {
        let path = write_csv("fraudnet_frame_bad.csv", "A,B\n1.0,oops\n");
        let err = Frame::from_csv(&path).unwrap_err();
        match err {
            DataError::BadValue { row, column, value } => {
                assert_eq!(row, 0);
                assert_eq!(column, "B");
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_drop_column() {
        let path = write_csv("fraudnet_frame_drop.csv", "Time,V1,Class\n0,1.0,0\n60,2.0,1\n");
        let frame = Frame::from_csv(&path).unwrap();
        let dropped = frame.drop_column("Time").unwrap();
        assert_eq!(dropped.headers(), &["V1", "Class"]);
        assert_eq!(dropped.n_cols(), 2);
        assert!(!dropped.has_column("Time"));
        assert!(frame.drop_column("Nope").is_err());
    }

    #[test]
    fn test_class_counts() {
        let path = write_csv(
            "fraudnet_frame_counts.csv",
            "Amount,Class\n1,0\n2,0\n3,1\n4,0\n",
        );
        let frame = Frame::from_csv(&path).unwrap();
        let counts = frame.class_counts("Class").unwrap();
        assert_eq!(counts[&0], 3);
        assert_eq!(counts[&1], 1);
    }

    #[test]
    fn test_position() {
        let path = write_csv("fraudnet_frame_pos.csv", "Time,Amount,Class\n0,1,0\n");
        let frame = Frame::from_csv(&path).unwrap();
        assert_eq!(frame.position("Amount").unwrap(), 1);
        assert!(frame.position("V99").is_err());
    }
}

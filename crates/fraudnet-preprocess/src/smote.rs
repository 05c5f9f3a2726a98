use crate::error::{PreprocessError, PreprocessResult};
use fraudnet_core::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic Minority Over-sampling Technique for binary labels.
///
/// Generates synthetic minority rows by interpolating between a minority
/// sample and one of its k nearest minority neighbors until both classes
/// have equal counts. Original rows are preserved as a prefix of the
/// resampled output; only the training split should ever pass through here.
#[derive(Debug, Clone)]
pub struct Smote {
    pub k: usize,
    pub seed: u64,
}

impl Smote {
    pub fn new(k: usize, seed: u64) -> Self {
        Smote { k, seed }
    }

    /// Resample `(x, y)` to an exact 1:1 class balance.
    pub fn fit_resample(&self, x: &Matrix, y: &[f64]) -> PreprocessResult<(Matrix, Vec<f64>)> {
        if x.rows() != y.len() {
            return Err(PreprocessError::LengthMismatch {
                x_rows: x.rows(),
                y_len: y.len(),
            });
        }

        let mut counts = [0usize; 2];
        for &v in y {
            let label = v.round() as i64;
            if label != 0 && label != 1 {
                return Err(PreprocessError::NonBinaryLabel(label));
            }
            counts[label as usize] += 1;
        }

        if counts[0] == counts[1] {
            return Ok((x.clone(), y.to_vec()));
        }
        let minority_label = if counts[0] < counts[1] { 0.0 } else { 1.0 };
        let needed = counts[0].abs_diff(counts[1]);

        let minority_idx: Vec<usize> = (0..y.len())
            .filter(|&i| (y[i] - minority_label).abs() < 0.5)
            .collect();
        if minority_idx.len() < 2 {
            return Err(PreprocessError::TooFewMinoritySamples(minority_idx.len()));
        }
        let k = self.k.min(minority_idx.len() - 1);

        // k nearest minority neighbors per minority sample, computed once.
        let neighbors = nearest_neighbors(x, &minority_idx, k)?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut out_x = x.clone();
        let mut out_y = y.to_vec();
        let mut synthetic = Vec::with_capacity(x.cols());

        for _ in 0..needed {
            let base = rng.gen_range(0..minority_idx.len());
            let neigh = neighbors[base][rng.gen_range(0..k)];
            let gap: f64 = rng.gen();

            let base_row = x.row(minority_idx[base])?;
            let neigh_row = x.row(minority_idx[neigh])?;
            synthetic.clear();
            synthetic.extend(
                base_row
                    .iter()
                    .zip(neigh_row.iter())
                    .map(|(&a, &b)| a + gap * (b - a)),
            );
            out_x.push_row(&synthetic)?;
            out_y.push(minority_label);
        }

        Ok((out_x, out_y))
    }
}

/// For each row of `x` named in `subset`, the `k` nearest other subset
/// members by Euclidean distance, as positions into `subset`.
fn nearest_neighbors(
    x: &Matrix,
    subset: &[usize],
    k: usize,
) -> PreprocessResult<Vec<Vec<usize>>> {
    let n = subset.len();
    let mut all = Vec::with_capacity(n);
    for a in 0..n {
        let row_a = x.row(subset[a])?;
        let mut dists: Vec<(f64, usize)> = Vec::with_capacity(n - 1);
        for b in 0..n {
            if a == b {
                continue;
            }
            let row_b = x.row(subset[b])?;
            let d: f64 = row_a
                .iter()
                .zip(row_b.iter())
                .map(|(&p, &q)| (p - q) * (p - q))
                .sum();
            dists.push((d, b));
        }
        dists.sort_by(|p, q| p.0.partial_cmp(&q.0).unwrap_or(std::cmp::Ordering::Equal));
        all.push(dists.iter().take(k).map(|&(_, b)| b).collect());
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skewed_data() -> (Matrix, Vec<f64>) {
        // 8 majority rows around the origin, 3 minority rows around (10, 10).
        let rows = vec![
            vec![0.0, 0.1],
            vec![0.2, 0.0],
            vec![0.1, 0.3],
            vec![0.3, 0.2],
            vec![0.0, 0.0],
            vec![0.2, 0.2],
            vec![0.1, 0.1],
            vec![0.3, 0.0],
            vec![10.0, 10.0],
            vec![10.5, 10.2],
            vec![10.2, 10.6],
        ];
        let x = Matrix::from_rows(&rows).unwrap();
        let y = vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        (x, y)
    }

    #[test]
    fn test_balances_classes() {
        let (x, y) = skewed_data();
        let (rx, ry) = Smote::new(5, 42).fit_resample(&x, &y).unwrap();

        let pos = ry.iter().filter(|&&v| v > 0.5).count();
        let neg = ry.len() - pos;
        assert_eq!(pos, neg);
        assert_eq!(rx.rows(), ry.len());
        assert_eq!(rx.rows(), 16);
    }

    #[test]
    fn test_originals_preserved() {
        let (x, y) = skewed_data();
        let (rx, _) = Smote::new(5, 42).fit_resample(&x, &y).unwrap();
        for i in 0..x.rows() {
            assert_eq!(rx.row(i).unwrap(), x.row(i).unwrap());
        }
    }

    #[test]
    fn test_synthetic_rows_interpolate() {
        let (x, y) = skewed_data();
        let (rx, _) = Smote::new(5, 42).fit_resample(&x, &y).unwrap();
        // Synthetic minority rows stay inside the minority cluster's bounding box.
        for i in x.rows()..rx.rows() {
            let row = rx.row(i).unwrap();
            assert!(row[0] >= 10.0 && row[0] <= 10.5, "x0 = {}", row[0]);
            assert!(row[1] >= 10.0 && row[1] <= 10.6, "x1 = {}", row[1]);
        }
    }

    #[test]
    fn test_determinism() {
        let (x, y) = skewed_data();
        let smote = Smote::new(5, 42);
        let (a, _) = smote.fit_resample(&x, &y).unwrap();
        let (b, _) = smote.fit_resample(&x, &y).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_already_balanced() {
        let x = Matrix::from_rows(&[vec![0.0], vec![1.0]]).unwrap();
        let y = vec![0.0, 1.0];
        let (rx, ry) = Smote::new(5, 42).fit_resample(&x, &y).unwrap();
        assert_eq!(rx, x);
        assert_eq!(ry, y);
    }

    #[test]
    fn test_too_few_minority() {
        let x = Matrix::from_rows(&[vec![0.0], vec![1.0], vec![2.0]]).unwrap();
        let y = vec![0.0, 0.0, 1.0];
        assert_eq!(
            Smote::new(5, 42).fit_resample(&x, &y).unwrap_err(),
            PreprocessError::TooFewMinoritySamples(1)
        );
    }

    #[test]
    fn test_non_binary_label() {
        let x = Matrix::from_rows(&[vec![0.0], vec![1.0]]).unwrap();
        let y = vec![0.0, 2.0];
        assert_eq!(
            Smote::new(5, 42).fit_resample(&x, &y).unwrap_err(),
            PreprocessError::NonBinaryLabel(2)
        );
    }
}

use crate::error::{PreprocessError, PreprocessResult};
use fraudnet_core::Matrix;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A stratified train/test partition.
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Matrix,
    pub x_test: Matrix,
    pub y_train: Vec<f64>,
    pub y_test: Vec<f64>,
}

/// Split data into training and test sets, stratified by label.
///
/// Each label's rows are shuffled independently and `round(n_label *
/// test_ratio)` of them go to the test set, so both subsets keep the
/// original label proportions. Deterministic under a fixed seed.
pub fn stratified_split(
    x: &Matrix,
    y: &[f64],
    test_ratio: f64,
    seed: u64,
) -> PreprocessResult<Split> {
    if x.rows() != y.len() {
        return Err(PreprocessError::LengthMismatch {
            x_rows: x.rows(),
            y_len: y.len(),
        });
    }
    if !(0.0..1.0).contains(&test_ratio) || test_ratio == 0.0 {
        return Err(PreprocessError::BadTestRatio(test_ratio));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    // Group row indices by integer label, in label order for determinism.
    let labels: Vec<i64> = y.iter().map(|&v| v.round() as i64).collect();
    let mut distinct = labels.clone();
    distinct.sort_unstable();
    distinct.dedup();

    let mut train_idx = Vec::new();
    let mut test_idx = Vec::new();

    for label in distinct {
        let mut members: Vec<usize> = (0..labels.len()).filter(|&i| labels[i] == label).collect();
        members.shuffle(&mut rng);
        let n_test = (members.len() as f64 * test_ratio).round() as usize;
        test_idx.extend_from_slice(&members[..n_test]);
        train_idx.extend_from_slice(&members[n_test..]);
    }

    // Interleave classes again so neither subset is label-blocked.
    train_idx.shuffle(&mut rng);
    test_idx.shuffle(&mut rng);

    Ok(Split {
        x_train: x.select_rows(&train_idx)?,
        x_test: x.select_rows(&test_idx)?,
        y_train: train_idx.iter().map(|&i| y[i]).collect(),
        y_test: test_idx.iter().map(|&i| y[i]).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imbalanced_data(n: usize, n_pos: usize) -> (Matrix, Vec<f64>) {
        // Feature column encodes the row index so splits can be compared.
        let rows: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64, (i * 2) as f64]).collect();
        let x = Matrix::from_rows(&rows).unwrap();
        let y: Vec<f64> = (0..n).map(|i| if i < n_pos { 1.0 } else { 0.0 }).collect();
        (x, y)
    }

    #[test]
    fn test_sizes_and_disjointness() {
        let (x, y) = imbalanced_data(100, 5);
        let split = stratified_split(&x, &y, 0.2, 42).unwrap();

        assert_eq!(split.x_train.rows() + split.x_test.rows(), 100);
        assert_eq!(split.y_train.len(), split.x_train.rows());
        assert_eq!(split.y_test.len(), split.x_test.rows());

        // Row ids (first feature) are disjoint across the two subsets.
        let mut seen: Vec<i64> = split
            .x_train
            .col(0)
            .unwrap()
            .iter()
            .chain(split.x_test.col(0).unwrap().iter())
            .map(|&v| v as i64)
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn test_stratification() {
        // 100 rows, 5 positive: 80/20 split puts exactly 1 positive in test.
        let (x, y) = imbalanced_data(100, 5);
        let split = stratified_split(&x, &y, 0.2, 42).unwrap();

        let test_pos = split.y_test.iter().filter(|&&v| v > 0.5).count();
        let train_pos = split.y_train.iter().filter(|&&v| v > 0.5).count();
        assert_eq!(test_pos, 1);
        assert_eq!(train_pos, 4);
        assert_eq!(split.y_test.len(), 20);
    }

    #[test]
    fn test_determinism() {
        let (x, y) = imbalanced_data(60, 12);
        let a = stratified_split(&x, &y, 0.25, 42).unwrap();
        let b = stratified_split(&x, &y, 0.25, 42).unwrap();
        assert_eq!(a.x_train, b.x_train);
        assert_eq!(a.x_test, b.x_test);
        assert_eq!(a.y_train, b.y_train);
        assert_eq!(a.y_test, b.y_test);

        let c = stratified_split(&x, &y, 0.25, 7).unwrap();
        assert_ne!(a.x_test, c.x_test);
    }

    #[test]
    fn test_bad_inputs() {
        let (x, y) = imbalanced_data(10, 2);
        assert!(matches!(
            stratified_split(&x, &y[..5], 0.2, 42),
            Err(PreprocessError::LengthMismatch { .. })
        ));
        assert!(matches!(
            stratified_split(&x, &y, 0.0, 42),
            Err(PreprocessError::BadTestRatio(_))
        ));
        assert!(matches!(
            stratified_split(&x, &y, 1.5, 42),
            Err(PreprocessError::BadTestRatio(_))
        ));
    }
}

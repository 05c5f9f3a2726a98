/// Threshold probabilities into hard 0/1 predictions.
pub fn binarize(proba: &[f64], threshold: f64) -> Vec<f64> {
    proba
        .iter()
        .map(|&p| if p > threshold { 1.0 } else { 0.0 })
        .collect()
}

/// Fraction of correct predictions.
pub fn accuracy(y_true: &[f64], y_pred: &[f64]) -> f64 {
    assert_eq!(y_true.len(), y_pred.len(), "length mismatch");
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(&t, &p)| (t - p).abs() < 0.5)
        .count();
    correct as f64 / y_true.len() as f64
}

/// Confusion matrix: `matrix[true][pred]` counts.
pub fn confusion_matrix(y_true: &[f64], y_pred: &[f64], n_classes: usize) -> Vec<Vec<usize>> {
    let mut matrix = vec![vec![0usize; n_classes]; n_classes];
    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        let ti = t.round() as usize;
        let pi = p.round() as usize;
        if ti < n_classes && pi < n_classes {
            matrix[ti][pi] += 1;
        }
    }
    matrix
}

/// Precision for a specific class: TP / (TP + FP).
pub fn precision_class(y_true: &[f64], y_pred: &[f64], class: usize) -> f64 {
    let mut tp = 0usize;
    let mut fp = 0usize;
    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        if p.round() as usize == class {
            if t.round() as usize == class {
                tp += 1;
            } else {
                fp += 1;
            }
        }
    }
    if tp + fp == 0 {
        0.0
    } else {
        tp as f64 / (tp + fp) as f64
    }
}

/// Recall for a specific class: TP / (TP + FN).
pub fn recall_class(y_true: &[f64], y_pred: &[f64], class: usize) -> f64 {
    let mut tp = 0usize;
    let mut fn_ = 0usize;
    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        if t.round() as usize == class {
            if p.round() as usize == class {
                tp += 1;
            } else {
                fn_ += 1;
            }
        }
    }
    if tp + fn_ == 0 {
        0.0
    } else {
        tp as f64 / (tp + fn_) as f64
    }
}

/// F1 score for a specific class: harmonic mean of precision and recall.
pub fn f1_score_class(y_true: &[f64], y_pred: &[f64], class: usize) -> f64 {
    let p = precision_class(y_true, y_pred, class);
    let r = recall_class(y_true, y_pred, class);
    if p + r == 0.0 {
        0.0
    } else {
        2.0 * p * r / (p + r)
    }
}

/// Log loss (binary cross-entropy) for probabilistic predictions.
///
/// L = -mean(y·log(p) + (1-y)·log(1-p))
pub fn log_loss(y_true: &[f64], y_proba: &[f64]) -> f64 {
    assert_eq!(y_true.len(), y_proba.len(), "length mismatch");
    if y_true.is_empty() {
        return 0.0;
    }
    let eps = 1e-15;
    let mut total = 0.0;
    for (&y, &p) in y_true.iter().zip(y_proba.iter()) {
        let p = p.clamp(eps, 1.0 - eps);
        total -= y * p.ln() + (1.0 - y) * (1.0 - p).ln();
    }
    total / y_true.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_binarize() {
        let pred = binarize(&[0.2, 0.5, 0.7, 0.49, 0.51], 0.5);
        assert_eq!(pred, vec![0.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_accuracy() {
        let y_true = [0.0, 1.0, 1.0, 0.0, 1.0];
        let y_pred = [0.0, 1.0, 0.0, 0.0, 1.0];
        assert_relative_eq!(accuracy(&y_true, &y_pred), 0.8);
    }

    #[test]
    fn test_confusion_matrix() {
        let y_true = [0.0, 0.0, 1.0, 1.0];
        let y_pred = [0.0, 1.0, 0.0, 1.0];
        let cm = confusion_matrix(&y_true, &y_pred, 2);
        assert_eq!(cm[0][0], 1); // TN
        assert_eq!(cm[0][1], 1); // FP
        assert_eq!(cm[1][0], 1); // FN
        assert_eq!(cm[1][1], 1); // TP
    }

    #[test]
    fn test_precision_recall_f1() {
        let y_true = [1.0, 1.0, 0.0, 0.0, 1.0];
        let y_pred = [1.0, 0.0, 0.0, 1.0, 1.0];
        // TP=2, FP=1, FN=1
        assert_relative_eq!(precision_class(&y_true, &y_pred, 1), 2.0 / 3.0);
        assert_relative_eq!(recall_class(&y_true, &y_pred, 1), 2.0 / 3.0);
        assert_relative_eq!(f1_score_class(&y_true, &y_pred, 1), 2.0 / 3.0);
    }

    #[test]
    fn test_degenerate_precision() {
        // No positive predictions at all.
        let y_true = [1.0, 0.0];
        let y_pred = [0.0, 0.0];
        assert_eq!(precision_class(&y_true, &y_pred, 1), 0.0);
        assert_eq!(recall_class(&y_true, &y_pred, 1), 0.0);
        assert_eq!(f1_score_class(&y_true, &y_pred, 1), 0.0);
    }

    #[test]
    fn test_log_loss() {
        assert_relative_eq!(
            log_loss(&[1.0, 0.0], &[0.5, 0.5]),
            std::f64::consts::LN_2,
            epsilon = 1e-12
        );
        assert!(log_loss(&[1.0], &[1.0]) < 1e-10);
    }
}

/// ROC-AUC for binary classification.
///
/// Area under the Receiver Operating Characteristic curve via the
/// trapezoidal rule over all score thresholds. Returns 0.5 when only one
/// class is present (the curve is undefined).
pub fn roc_auc(y_true: &[f64], y_scores: &[f64]) -> f64 {
    let (fpr, tpr) = roc_curve(y_true, y_scores);
    if fpr.len() < 2 {
        return 0.5;
    }
    let mut auc = 0.0;
    for i in 1..fpr.len() {
        auc += (fpr[i] - fpr[i - 1]) * (tpr[i] + tpr[i - 1]) / 2.0;
    }
    auc
}

/// ROC curve points: `(fpr, tpr)` vectors, starting at (0, 0) and ending
/// at (1, 1), one point per distinct score in descending order. Samples
/// sharing a score advance together so the curve is order-independent.
pub fn roc_curve(y_true: &[f64], y_scores: &[f64]) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(y_true.len(), y_scores.len(), "length mismatch");

    let mut pairs: Vec<(f64, f64)> = y_scores
        .iter()
        .zip(y_true.iter())
        .map(|(&s, &t)| (s, t.round()))
        .collect();
    pairs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let total_pos = pairs.iter().filter(|(_, t)| *t > 0.5).count() as f64;
    let total_neg = pairs.len() as f64 - total_pos;
    if total_pos == 0.0 || total_neg == 0.0 {
        return (Vec::new(), Vec::new());
    }

    let mut fpr = Vec::with_capacity(pairs.len() + 1);
    let mut tpr = Vec::with_capacity(pairs.len() + 1);
    fpr.push(0.0);
    tpr.push(0.0);

    let mut tp = 0.0;
    let mut fp = 0.0;
    let mut i = 0;
    while i < pairs.len() {
        let score = pairs[i].0;
        while i < pairs.len() && pairs[i].0 == score {
            if pairs[i].1 > 0.5 {
                tp += 1.0;
            } else {
                fp += 1.0;
            }
            i += 1;
        }
        fpr.push(fp / total_neg);
        tpr.push(tp / total_pos);
    }
    (fpr, tpr)
}

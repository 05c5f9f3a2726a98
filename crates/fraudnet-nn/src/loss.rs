/// Binary cross-entropy over predicted probabilities.
///
/// L = -mean(y·ln(p) + (1-y)·ln(1-p)), with predictions clamped away
/// from 0 and 1 for numerical stability.
pub fn bce_loss(proba: &[f64], target: &[f64]) -> f64 {
    assert_eq!(proba.len(), target.len(), "length mismatch");
    if proba.is_empty() {
        return 0.0;
    }
    let eps = 1e-7;
    let mut total = 0.0;
    for (&p, &y) in proba.iter().zip(target.iter()) {
        let p = p.clamp(eps, 1.0 - eps);
        total -= y * p.ln() + (1.0 - y) * (1.0 - p).ln();
    }
    total / proba.len() as f64
}

use crate::classification::{accuracy, f1_score_class, precision_class, recall_class};
use std::fmt;

/// One class's row in a classification report.
#[derive(Debug, Clone)]
pub struct ClassRow {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class precision/recall/F1 with macro and support-weighted averages,
/// rendered as the familiar tabular text report.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub classes: Vec<ClassRow>,
    pub accuracy: f64,
    pub macro_avg: ClassRow,
    pub weighted_avg: ClassRow,
    pub total_support: usize,
}

impl ClassificationReport {
    /// Compute the report. `labels[i]` names class `i`.
    pub fn compute(y_true: &[f64], y_pred: &[f64], labels: &[&str]) -> Self {
        let n = y_true.len();
        let mut classes = Vec::with_capacity(labels.len());
        for (class, &label) in labels.iter().enumerate() {
            let support = y_true
                .iter()
                .filter(|&&t| t.round() as usize == class)
                .count();
            classes.push(ClassRow {
                label: label.to_string(),
                precision: precision_class(y_true, y_pred, class),
                recall: recall_class(y_true, y_pred, class),
                f1: f1_score_class(y_true, y_pred, class),
                support,
            });
        }

        let k = classes.len() as f64;
        let macro_avg = ClassRow {
            label: "macro avg".to_string(),
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / k,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / k,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / k,
            support: n,
        };
        let weighted_avg = ClassRow {
            label: "weighted avg".to_string(),
            precision: weighted(&classes, n, |c| c.precision),
            recall: weighted(&classes, n, |c| c.recall),
            f1: weighted(&classes, n, |c| c.f1),
            support: n,
        };

        ClassificationReport {
            classes,
            accuracy: accuracy(y_true, y_pred),
            macro_avg,
            weighted_avg,
            total_support: n,
        }
    }
}

fn weighted<F: Fn(&ClassRow) -> f64>(classes: &[ClassRow], n: usize, f: F) -> f64 {
    if n == 0 {
        return 0.0;
    }
    classes
        .iter()
        .map(|c| f(c) * c.support as f64)
        .sum::<f64>()
        / n as f64
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.len())
            .chain([12usize])
            .max()
            .unwrap_or(12);

        writeln!(
            f,
            "{:>width$}  precision    recall  f1-score   support",
            "",
            width = width
        )?;
        writeln!(f)?;
        for row in &self.classes {
            writeln!(
                f,
                "{:>width$}  {:>9.2}  {:>8.2}  {:>8.2}  {:>8}",
                row.label,
                row.precision,
                row.recall,
                row.f1,
                row.support,
                width = width
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9}  {:>8}  {:>8.2}  {:>8}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.total_support,
            width = width
        )?;
        for row in [&self.macro_avg, &self.weighted_avg] {
            writeln!(
                f,
                "{:>width$}  {:>9.2}  {:>8.2}  {:>8.2}  {:>8}",
                row.label,
                row.precision,
                row.recall,
                row.f1,
                row.support,
                width = width
            )?;
        }
        Ok(())
    }
}

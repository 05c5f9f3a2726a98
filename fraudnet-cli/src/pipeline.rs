use anyhow::Context;
use fraudnet_data::Frame;
use fraudnet_metrics::{
    accuracy, binarize, confusion_matrix, log_loss, roc_auc, roc_curve, ClassificationReport,
};
use fraudnet_nn::{fit, History, Network, TrainConfig};
use fraudnet_plot::{confusion_heatmap, history_chart, roc_chart};
use fraudnet_preprocess::{Smote, StandardScaler, stratified_split};
use log::{info, warn};
use std::fmt;
use std::fs;
use std::path::PathBuf;

const CLASS_NAMES: [&str; 2] = ["Non-Fraud", "Fraud"];
const TEST_RATIO: f64 = 0.2;
const SMOTE_NEIGHBORS: usize = 5;

pub struct PipelineConfig {
    pub data_path: PathBuf,
    pub out_dir: PathBuf,
    pub epochs: usize,
    pub batch_size: usize,
    pub seed: u64,
    pub threshold: f64,
}

/// Test-set evaluation of a trained classifier.
pub struct Summary {
    pub loss: f64,
    pub accuracy: f64,
    pub roc_auc: f64,
    pub report: ClassificationReport,
    pub confusion: Vec<Vec<usize>>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Test loss: {:.4}  accuracy: {:.4}", self.loss, self.accuracy)?;
        writeln!(f, "ROC-AUC:   {:.4}", self.roc_auc)?;
        writeln!(f)?;
        writeln!(f, "{}", self.report)?;
        writeln!(f, "Confusion matrix (rows = actual, cols = predicted):")?;
        for (i, row) in self.confusion.iter().enumerate() {
            writeln!(f, "  {:>9}  {:>8}  {:>8}", CLASS_NAMES[i], row[0], row[1])?;
        }
        Ok(())
    }
}

/// Run the full workflow: load, preprocess, split, oversample, train,
/// evaluate on the held-out test set and render the evaluation charts.
pub fn run(config: &PipelineConfig) -> anyhow::Result<Summary> {
    let frame = Frame::from_csv(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    info!(
        "loaded {} transactions with {} columns",
        frame.n_rows(),
        frame.n_cols()
    );
    for (label, count) in frame.class_counts("Class")? {
        info!("class {label}: {count} rows");
    }

    let y = frame.column("Class")?;
    let features = frame.drop_column("Time")?.drop_column("Class")?;
    let amount_col = features.position("Amount")?;
    let n_features = features.n_cols();
    let mut x = features.into_matrix();

    // Amount is standardised on the full dataset before the split; the
    // scaler's statistics include the test rows.
    let mut scaler = StandardScaler::new();
    scaler.fit_transform_column(&mut x, amount_col)?;

    let split = stratified_split(&x, &y, TEST_RATIO, config.seed)?;
    info!(
        "split: {} train rows, {} test rows",
        split.x_train.rows(),
        split.x_test.rows()
    );

    let smote = Smote::new(SMOTE_NEIGHBORS, config.seed);
    let (x_train, y_train) = smote.fit_resample(&split.x_train, &split.y_train)?;
    info!(
        "after oversampling: {} train rows ({} fraud)",
        x_train.rows(),
        y_train.iter().filter(|&&v| v == 1.0).count()
    );

    let mut net = Network::fraud_classifier(n_features, config.seed);
    let train_cfg = TrainConfig {
        epochs: config.epochs,
        batch_size: config.batch_size,
        seed: config.seed,
        ..TrainConfig::default()
    };
    let history = fit(&mut net, &x_train, &y_train, &train_cfg)?;

    let proba = net.predict_proba(&split.x_test)?;
    let y_pred = binarize(&proba, config.threshold);
    let summary = Summary {
        loss: log_loss(&split.y_test, &proba),
        accuracy: accuracy(&split.y_test, &y_pred),
        roc_auc: roc_auc(&split.y_test, &proba),
        report: ClassificationReport::compute(&split.y_test, &y_pred, &CLASS_NAMES),
        confusion: confusion_matrix(&split.y_test, &y_pred, CLASS_NAMES.len()),
    };

    if let Err(err) = render_charts(config, &summary, &history, &split.y_test, &proba) {
        warn!("chart rendering skipped: {err}");
    }

    Ok(summary)
}

fn render_charts(
    config: &PipelineConfig,
    summary: &Summary,
    history: &History,
    y_test: &[f64],
    proba: &[f64],
) -> anyhow::Result<()> {
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating {}", config.out_dir.display()))?;

    confusion_heatmap(
        &summary.confusion,
        &CLASS_NAMES,
        &config.out_dir.join("confusion_matrix.png"),
    )?;

    let (fpr, tpr) = roc_curve(y_test, proba);
    if fpr.is_empty() {
        warn!("single-class test set, skipping ROC chart");
    } else {
        roc_chart(
            &fpr,
            &tpr,
            summary.roc_auc,
            &config.out_dir.join("roc_curve.png"),
        )?;
    }

    history_chart(
        &history.loss,
        &history.val_loss,
        &history.accuracy,
        &history.val_accuracy,
        &config.out_dir.join("training_history.png"),
    )?;
    info!("charts written to {}", config.out_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::fmt::Write as _;

    /// 100 transactions, 5 of them fraud, with the fraud rows shifted so
    /// the classes are separable.
    fn synthetic_csv(name: &str) -> PathBuf {
        let mut rng = StdRng::seed_from_u64(7);
        let mut csv = String::from("Time,V1,V2,V3,Amount,Class\n");
        for i in 0..100 {
            let fraud = i % 20 == 0;
            let (center, class) = if fraud { (4.0, 1) } else { (0.0, 0) };
            let amount = if fraud { 900.0 } else { 50.0 } + rng.gen::<f64>() * 10.0;
            writeln!(
                csv,
                "{},{:.4},{:.4},{:.4},{:.2},{}",
                i,
                center + rng.gen::<f64>(),
                center + rng.gen::<f64>(),
                center + rng.gen::<f64>(),
                amount,
                class
            )
            .unwrap();
        }
        let path = std::env::temp_dir().join(name);
        fs::write(&path, csv).unwrap();
        path
    }

    fn config(data_path: PathBuf, out_name: &str) -> PipelineConfig {
        PipelineConfig {
            data_path,
            out_dir: std::env::temp_dir().join(out_name),
            epochs: 3,
            batch_size: 16,
            seed: 42,
            threshold: 0.5,
        }
    }

    #[test]
    fn test_end_to_end() {
        let cfg = config(synthetic_csv("fraudnet_e2e.csv"), "fraudnet_e2e_plots");
        let summary = run(&cfg).unwrap();

        // 20% of 95 non-fraud and 20% of 5 fraud rows.
        let total: usize = summary.confusion.iter().flatten().sum();
        assert_eq!(total, 20);
        assert_eq!(summary.report.classes[1].support, 1);
        assert_eq!(summary.report.total_support, 20);
        assert!(summary.roc_auc >= 0.0 && summary.roc_auc <= 1.0);
        assert!(summary.loss.is_finite());

        let text = summary.to_string();
        assert!(text.contains("ROC-AUC"));
        assert!(text.contains("Fraud"));
    }

    #[test]
    fn test_deterministic_runs() {
        let cfg = config(synthetic_csv("fraudnet_det.csv"), "fraudnet_det_plots");
        let first = run(&cfg).unwrap();
        let second = run(&cfg).unwrap();
        assert_eq!(first.confusion, second.confusion);
        assert_eq!(first.loss, second.loss);
        assert_eq!(first.roc_auc, second.roc_auc);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let cfg = config(PathBuf::from("/nonexistent/creditcard.csv"), "fraudnet_none");
        assert!(run(&cfg).is_err());
    }
}

use crate::loss::bce_loss;
use crate::network::Network;
use crate::optim::Adam;
use fraudnet_core::{Matrix, MatrixError};
use fraudnet_data::Batches;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

/// Errors raised while configuring or running a training loop.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("Network has no layers")]
    EmptyNetwork,

    #[error("Training set is empty")]
    EmptyDataset,

    #[error("Feature rows ({x_rows}) do not match label count ({y_len})")]
    LengthMismatch { x_rows: usize, y_len: usize },

    #[error("Validation split {0} must be in [0, 1)")]
    BadValidationSplit(f64),

    #[error("Batch size must be positive")]
    ZeroBatchSize,

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub type TrainResult<T> = Result<T, TrainError>;

/// Knobs for one training run. Defaults mirror the fraud classifier:
/// 10 epochs, batches of 32, 20% validation hold-out, Adam at 1e-3.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub validation_split: f64,
    pub lr: f64,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 10,
            batch_size: 32,
            validation_split: 0.2,
            lr: 0.001,
            seed: 42,
        }
    }
}

/// Per-epoch training curves.
#[derive(Debug, Clone, Default)]
pub struct History {
    pub loss: Vec<f64>,
    pub accuracy: Vec<f64>,
    pub val_loss: Vec<f64>,
    pub val_accuracy: Vec<f64>,
}

/// Train a network with mini-batch Adam on binary cross-entropy.
///
/// The trailing `validation_split` fraction of the rows is held out once
/// and monitored every epoch; the remaining rows are shuffled per epoch.
/// Backpropagation exploits the sigmoid + BCE pairing at the output, where
/// the delta collapses to `a - y`.
pub fn fit(net: &mut Network, x: &Matrix, y: &[f64], cfg: &TrainConfig) -> TrainResult<History> {
    if net.is_empty() {
        return Err(TrainError::EmptyNetwork);
    }
    if x.rows() == 0 {
        return Err(TrainError::EmptyDataset);
    }
    if x.rows() != y.len() {
        return Err(TrainError::LengthMismatch {
            x_rows: x.rows(),
            y_len: y.len(),
        });
    }
    if !(0.0..1.0).contains(&cfg.validation_split) {
        return Err(TrainError::BadValidationSplit(cfg.validation_split));
    }
    if cfg.batch_size == 0 {
        return Err(TrainError::ZeroBatchSize);
    }

    let n = x.rows();
    let n_val = (n as f64 * cfg.validation_split).round() as usize;
    let n_train = n - n_val;
    if n_train == 0 {
        return Err(TrainError::EmptyDataset);
    }

    let (x_val, y_val) = if n_val > 0 {
        (Some(x.slice_rows(n_train, n)?), &y[n_train..])
    } else {
        (None, &y[0..0])
    };

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut adam = Adam::new(cfg.lr);
    let mut history = History::default();

    for epoch in 0..cfg.epochs {
        let mut order: Vec<usize> = (0..n_train).collect();
        order.shuffle(&mut rng);

        let mut epoch_loss = 0.0;
        let mut correct = 0usize;

        for (xb, yb) in Batches::new(x, y, order, cfg.batch_size) {
            let batch = xb.rows();

            // Forward, caching pre-activations and activations per layer.
            let mut zs = Vec::with_capacity(net.layers().len());
            let mut activations = Vec::with_capacity(net.layers().len() + 1);
            activations.push(xb);
            for layer in net.layers() {
                let (z, a) = layer.forward(activations.last().expect("non-empty"))?;
                zs.push(z);
                activations.push(a);
            }

            let proba = activations.last().expect("non-empty").data();
            epoch_loss += bce_loss(proba, &yb) * batch as f64;
            correct += proba
                .iter()
                .zip(yb.iter())
                .filter(|(&p, &t)| (p > 0.5) == (t > 0.5))
                .count();

            // Reverse pass: output delta is a - y for sigmoid + BCE.
            let y_col = Matrix::col_vector(&yb);
            let mut delta = activations.last().expect("non-empty").sub(&y_col)?;

            let n_layers = net.layers().len();
            let mut grads: Vec<Matrix> = vec![Matrix::zeros(0, 0); 2 * n_layers];
            for l in (0..n_layers).rev() {
                let a_prev = &activations[l];
                grads[2 * l] = a_prev.t().matmul(&delta)?.scale(1.0 / batch as f64);
                grads[2 * l + 1] = delta.sum_rows().scale(1.0 / batch as f64);
                if l > 0 {
                    let back = delta.matmul(&net.layers()[l].weight.t())?;
                    let act = net.layers()[l - 1].activation;
                    delta = back.hadamard(&zs[l - 1].map(|z| act.derivative(z)))?;
                }
            }

            let mut params: Vec<&mut Matrix> = net
                .layers_mut()
                .iter_mut()
                .flat_map(|l| [&mut l.weight, &mut l.bias])
                .collect();
            adam.step(&mut params, &grads)?;
        }

        history.loss.push(epoch_loss / n_train as f64);
        history.accuracy.push(correct as f64 / n_train as f64);

        if let Some(xv) = &x_val {
            let proba = net.predict_proba(xv)?;
            let val_loss = bce_loss(&proba, y_val);
            let val_acc = proba
                .iter()
                .zip(y_val.iter())
                .filter(|(&p, &t)| (p > 0.5) == (t > 0.5))
                .count() as f64
                / y_val.len() as f64;
            history.val_loss.push(val_loss);
            history.val_accuracy.push(val_acc);

            log::info!(
                "epoch {}/{} - loss {:.4} - acc {:.4} - val_loss {:.4} - val_acc {:.4}",
                epoch + 1,
                cfg.epochs,
                history.loss[epoch],
                history.accuracy[epoch],
                val_loss,
                val_acc,
            );
        } else {
            log::info!(
                "epoch {}/{} - loss {:.4} - acc {:.4}",
                epoch + 1,
                cfg.epochs,
                history.loss[epoch],
                history.accuracy[epoch],
            );
        }
    }

    Ok(history)
}

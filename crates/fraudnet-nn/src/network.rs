use crate::layers::{Activation, Dense};
use fraudnet_core::{Matrix, MatrixResult};

/// Sequential dense network — chains layers in order.
#[derive(Debug, Clone, Default)]
pub struct Network {
    layers: Vec<Dense>,
}

impl Network {
    pub fn new() -> Self {
        Network { layers: Vec::new() }
    }

    /// Add a layer to the model.
    pub fn add(mut self, layer: Dense) -> Self {
        self.layers.push(layer);
        self
    }

    /// The fraud classifier topology: input → 64 ReLU → 32 ReLU → 1 sigmoid.
    pub fn fraud_classifier(n_features: usize, seed: u64) -> Self {
        Network::new()
            .add(Dense::new(n_features, 64, Activation::Relu, seed))
            .add(Dense::new(64, 32, Activation::Relu, seed.wrapping_add(1)))
            .add(Dense::new(32, 1, Activation::Sigmoid, seed.wrapping_add(2)))
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Dense] {
        &mut self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Forward pass through all layers.
    pub fn forward(&self, input: &Matrix) -> MatrixResult<Matrix> {
        let mut x = input.clone();
        for layer in &self.layers {
            let (_, a) = layer.forward(&x)?;
            x = a;
        }
        Ok(x)
    }

    /// Predicted positive-class probabilities, one per input row.
    /// Expects a single sigmoid output unit.
    pub fn predict_proba(&self, input: &Matrix) -> MatrixResult<Vec<f64>> {
        let out = self.forward(input)?;
        Ok(out.data().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology() {
        let net = Network::fraud_classifier(29, 42);
        assert_eq!(net.layers().len(), 3);
        assert_eq!(net.layers()[0].weight.shape(), (29, 64));
        assert_eq!(net.layers()[1].weight.shape(), (64, 32));
        assert_eq!(net.layers()[2].weight.shape(), (32, 1));
        assert_eq!(net.layers()[2].activation, Activation::Sigmoid);
    }

    #[test]
    fn test_forward_probabilities() {
        let net = Network::fraud_classifier(5, 42);
        let x = Matrix::from_rows(&[vec![0.1, -0.2, 0.3, 0.0, 1.0], vec![1.0; 5]]).unwrap();
        let proba = net.predict_proba(&x).unwrap();
        assert_eq!(proba.len(), 2);
        assert!(proba.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }
}

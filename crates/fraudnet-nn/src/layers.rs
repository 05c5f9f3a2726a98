use fraudnet_core::{Matrix, MatrixResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Activation applied element-wise after a dense layer's affine map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Relu,
    Sigmoid,
}

impl Activation {
    pub fn apply(&self, z: f64) -> f64 {
        match self {
            Activation::Relu => z.max(0.0),
            Activation::Sigmoid => 1.0 / (1.0 + (-z).exp()),
        }
    }

    /// Derivative with respect to the pre-activation `z`.
    pub fn derivative(&self, z: f64) -> f64 {
        match self {
            Activation::Relu => {
                if z > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Sigmoid => {
                let s = 1.0 / (1.0 + (-z).exp());
                s * (1.0 - s)
            }
        }
    }
}

/// Fully connected layer: `a = act(x W + b)`.
#[derive(Debug, Clone)]
pub struct Dense {
    pub weight: Matrix,
    pub bias: Matrix,
    pub activation: Activation,
    pub in_features: usize,
    pub out_features: usize,
}

impl Dense {
    /// Create a dense layer with Xavier-uniform initialized weights and
    /// zero biases, deterministic under the given seed.
    pub fn new(in_features: usize, out_features: usize, activation: Activation, seed: u64) -> Self {
        let scale = (6.0 / (in_features + out_features) as f64).sqrt();
        let mut rng = StdRng::seed_from_u64(seed);
        let w_data: Vec<f64> = (0..in_features * out_features)
            .map(|_| rng.gen::<f64>() * 2.0 * scale - scale)
            .collect();
        let weight = Matrix::new(w_data, in_features, out_features)
            .expect("weight buffer sized by construction");

        Dense {
            weight,
            bias: Matrix::zeros(1, out_features),
            activation,
            in_features,
            out_features,
        }
    }

    /// Forward pass, returning both the pre-activation `z` and output `a`.
    /// The trainer needs `z` for the reverse pass.
    pub fn forward(&self, x: &Matrix) -> MatrixResult<(Matrix, Matrix)> {
        let z = x.matmul(&self.weight)?.add_row_vector(&self.bias)?;
        let a = z.map(|v| self.activation.apply(v));
        Ok((z, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_activations() {
        assert_eq!(Activation::Relu.apply(-3.0), 0.0);
        assert_eq!(Activation::Relu.apply(2.5), 2.5);
        assert_eq!(Activation::Relu.derivative(-1.0), 0.0);
        assert_eq!(Activation::Relu.derivative(1.0), 1.0);

        assert_relative_eq!(Activation::Sigmoid.apply(0.0), 0.5);
        assert_relative_eq!(Activation::Sigmoid.derivative(0.0), 0.25);
    }

    #[test]
    fn test_dense_shapes() {
        let layer = Dense::new(4, 3, Activation::Relu, 42);
        assert_eq!(layer.weight.shape(), (4, 3));
        assert_eq!(layer.bias.shape(), (1, 3));

        let x = Matrix::zeros(5, 4);
        let (z, a) = layer.forward(&x).unwrap();
        assert_eq!(z.shape(), (5, 3));
        assert_eq!(a.shape(), (5, 3));
    }

    #[test]
    fn test_xavier_bounds() {
        let layer = Dense::new(10, 10, Activation::Relu, 42);
        let scale = (6.0f64 / 20.0).sqrt();
        assert!(layer
            .weight
            .data()
            .iter()
            .all(|&w| w.abs() <= scale));
        // Not all zeros.
        assert!(layer.weight.data().iter().any(|&w| w != 0.0));
    }

    #[test]
    fn test_deterministic_init() {
        let a = Dense::new(6, 4, Activation::Relu, 42);
        let b = Dense::new(6, 4, Activation::Relu, 42);
        assert_eq!(a.weight, b.weight);

        let c = Dense::new(6, 4, Activation::Relu, 43);
        assert_ne!(a.weight, c.weight);
    }
}

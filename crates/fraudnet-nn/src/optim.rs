use fraudnet_core::{Matrix, MatrixResult};

/// Adam optimizer with bias-corrected first and second moments.
#[derive(Debug, Clone)]
pub struct Adam {
    pub lr: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    t: usize,
    m: Vec<Matrix>,
    v: Vec<Matrix>,
}

impl Adam {
    pub fn new(lr: f64) -> Self {
        Adam {
            lr,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            t: 0,
            m: Vec::new(),
            v: Vec::new(),
        }
    }

    /// Apply one update to every parameter. Moment buffers are allocated
    /// lazily from the gradient shapes on the first step.
    pub fn step(&mut self, params: &mut [&mut Matrix], grads: &[Matrix]) -> MatrixResult<()> {
        assert_eq!(params.len(), grads.len(), "one gradient per parameter");

        if self.m.is_empty() {
            self.m = grads.iter().map(|g| Matrix::zeros(g.rows(), g.cols())).collect();
            self.v = grads.iter().map(|g| Matrix::zeros(g.rows(), g.cols())).collect();
        }

        self.t += 1;
        let bias_correction1 = 1.0 - self.beta1.powi(self.t as i32);
        let bias_correction2 = 1.0 - self.beta2.powi(self.t as i32);

        for (i, grad) in grads.iter().enumerate() {
            // m = β1·m + (1-β1)·g
            self.m[i] = self.m[i]
                .scale(self.beta1)
                .add(&grad.scale(1.0 - self.beta1))?;

            // v = β2·v + (1-β2)·g²
            let grad_sq = grad.hadamard(grad)?;
            self.v[i] = self.v[i]
                .scale(self.beta2)
                .add(&grad_sq.scale(1.0 - self.beta2))?;

            let m_hat = self.m[i].scale(1.0 / bias_correction1);
            let v_hat = self.v[i].scale(1.0 / bias_correction2);

            let eps = self.epsilon;
            let inv_denom = v_hat.map(|x| 1.0 / (x.sqrt() + eps));
            let update = m_hat.hadamard(&inv_denom)?.scale(self.lr);
            *params[i] = params[i].sub(&update)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descends_quadratic() {
        // Minimize f(w) = w² from w = 5; gradient is 2w.
        let mut w = Matrix::row_vector(&[5.0]);
        let mut adam = Adam::new(0.1);
        for _ in 0..500 {
            let grad = w.scale(2.0);
            adam.step(&mut [&mut w], &[grad]).unwrap();
        }
        assert!(w.data()[0].abs() < 0.05, "w = {}", w.data()[0]);
    }

    #[test]
    fn test_first_step_magnitude() {
        // With bias correction, the first Adam step is ~lr regardless of
        // gradient scale.
        let mut w = Matrix::row_vector(&[0.0]);
        let mut adam = Adam::new(0.001);
        let grad = Matrix::row_vector(&[123.0]);
        adam.step(&mut [&mut w], &[grad]).unwrap();
        assert!((w.data()[0].abs() - 0.001).abs() < 1e-6, "w = {}", w.data()[0]);
    }
}

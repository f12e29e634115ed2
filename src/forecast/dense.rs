//! Single-output dense layer: `y = w . x + b`

use rand::Rng;

use super::initializer::glorot_uniform;
use super::lstm::dot;
use super::optimizer::Adam;

#[derive(Debug, Clone)]
pub struct DenseLayer {
    input_dim: usize,
    /// `[w (input_dim) | b]`
    params: Vec<f64>,
    grads: Vec<f64>,
}

impl DenseLayer {
    pub fn new<R: Rng>(input_dim: usize, rng: &mut R) -> Self {
        let mut params = glorot_uniform(rng, input_dim, 1, input_dim);
        params.push(0.0);
        Self {
            input_dim,
            grads: vec![0.0; params.len()],
            params,
        }
    }

    pub fn forward(&self, x: &[f64]) -> f64 {
        dot(&self.params[..self.input_dim], x) + self.params[self.input_dim]
    }

    /// Accumulate gradients for `dy = dL/dy` and return `dL/dx`
    pub fn backward(&mut self, x: &[f64], dy: f64) -> Vec<f64> {
        for (g, &xi) in self.grads.iter_mut().zip(x) {
            *g += dy * xi;
        }
        self.grads[self.input_dim] += dy;
        self.params[..self.input_dim].iter().map(|w| w * dy).collect()
    }

    pub fn zero_grad(&mut self) {
        self.grads.iter_mut().for_each(|g| *g = 0.0);
    }

    pub fn apply_gradients(&mut self, optimizer: &mut Adam) {
        optimizer.step(&mut self.params, &self.grads);
    }
}

//! LSTM layer with backpropagation through time.
//!
//! Gate order follows the usual `i, f, g, o` layout:
//! - i = sigmoid(W_i x + U_i h + b_i)
//! - f = sigmoid(W_f x + U_f h + b_f)
//! - g = tanh(W_g x + U_g h + b_g)
//! - o = sigmoid(W_o x + U_o h + b_o)
//! - c' = f * c + i * g,  h' = o * tanh(c')
//!
//! Parameters live in one flat buffer `[W (4H x D) | U (4H x H) | b (4H)]`
//! so the optimizer can treat the layer as a single vector.

use rand::Rng;

use super::initializer::{glorot_uniform, sigmoid, uniform};
use super::optimizer::Adam;

#[derive(Debug, Clone)]
pub struct LstmLayer {
    input_dim: usize,
    units: usize,
    params: Vec<f64>,
    grads: Vec<f64>,
}

/// Values saved from one time step for the backward pass
#[derive(Debug, Clone)]
struct StepCache {
    x: Vec<f64>,
    h_prev: Vec<f64>,
    c_prev: Vec<f64>,
    /// Activated gates, `4H` wide
    gates: Vec<f64>,
    tanh_c: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct LstmCache {
    steps: Vec<StepCache>,
}

impl LstmLayer {
    pub fn new<R: Rng>(input_dim: usize, units: usize, rng: &mut R) -> Self {
        let rows = 4 * units;
        let mut params = Vec::with_capacity(rows * (input_dim + units + 1));
        params.extend(glorot_uniform(rng, input_dim, rows, rows * input_dim));
        params.extend(uniform(rng, 1.0 / (units as f64).sqrt(), rows * units));

        let mut bias = vec![0.0; rows];
        // Forget gate starts open
        for b in &mut bias[units..2 * units] {
            *b = 1.0;
        }
        params.extend(bias);

        let grads = vec![0.0; params.len()];
        Self {
            input_dim,
            units,
            params,
            grads,
        }
    }

    fn split_params(&self) -> (&[f64], &[f64], &[f64]) {
        let rows = 4 * self.units;
        let (w, rest) = self.params.split_at(rows * self.input_dim);
        let (u, b) = rest.split_at(rows * self.units);
        (w, u, b)
    }

    /// Run the layer over a sequence, returning the hidden state at every step
    pub fn forward(&self, inputs: &[Vec<f64>]) -> (Vec<Vec<f64>>, LstmCache) {
        let h = self.units;
        let d = self.input_dim;
        let (w, u, b) = self.split_params();

        let mut h_prev = vec![0.0; h];
        let mut c_prev = vec![0.0; h];
        let mut outputs = Vec::with_capacity(inputs.len());
        let mut cache = LstmCache {
            steps: Vec::with_capacity(inputs.len()),
        };

        for x in inputs {
            debug_assert_eq!(x.len(), d);
            let mut gates = b.to_vec();
            for (r, z) in gates.iter_mut().enumerate() {
                *z += dot(&w[r * d..(r + 1) * d], x) + dot(&u[r * h..(r + 1) * h], &h_prev);
            }
            for k in 0..h {
                gates[k] = sigmoid(gates[k]);
                gates[h + k] = sigmoid(gates[h + k]);
                gates[2 * h + k] = gates[2 * h + k].tanh();
                gates[3 * h + k] = sigmoid(gates[3 * h + k]);
            }

            let mut c = vec![0.0; h];
            let mut tanh_c = vec![0.0; h];
            let mut h_next = vec![0.0; h];
            for k in 0..h {
                c[k] = gates[h + k] * c_prev[k] + gates[k] * gates[2 * h + k];
                tanh_c[k] = c[k].tanh();
                h_next[k] = gates[3 * h + k] * tanh_c[k];
            }

            cache.steps.push(StepCache {
                x: x.clone(),
                h_prev: std::mem::replace(&mut h_prev, h_next.clone()),
                c_prev: std::mem::replace(&mut c_prev, c),
                gates,
                tanh_c,
            });
            outputs.push(h_next);
        }

        (outputs, cache)
    }

    /// Backpropagate `d_outputs` (one gradient per step) through the sequence.
    /// Parameter gradients accumulate into the layer; returns input gradients.
    pub fn backward(&mut self, cache: &LstmCache, d_outputs: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let h = self.units;
        let d = self.input_dim;
        let rows = 4 * h;
        let u_offset = rows * d;
        let b_offset = u_offset + rows * h;

        let mut dh_next = vec![0.0; h];
        let mut dc_next = vec![0.0; h];
        let mut dz = vec![0.0; rows];
        let mut d_inputs = vec![Vec::new(); cache.steps.len()];

        for (t, step) in cache.steps.iter().enumerate().rev() {
            for k in 0..h {
                let i = step.gates[k];
                let f = step.gates[h + k];
                let g = step.gates[2 * h + k];
                let o = step.gates[3 * h + k];
                let tc = step.tanh_c[k];

                let dh = d_outputs[t][k] + dh_next[k];
                let d_o = dh * tc;
                let dc = dh * o * (1.0 - tc * tc) + dc_next[k];

                dz[k] = dc * g * i * (1.0 - i);
                dz[h + k] = dc * step.c_prev[k] * f * (1.0 - f);
                dz[2 * h + k] = dc * i * (1.0 - g * g);
                dz[3 * h + k] = d_o * o * (1.0 - o);
                dc_next[k] = dc * f;
            }

            let mut dx = vec![0.0; d];
            dh_next.iter_mut().for_each(|v| *v = 0.0);
            for (r, &dzr) in dz.iter().enumerate() {
                if dzr == 0.0 {
                    continue;
                }
                for j in 0..d {
                    self.grads[r * d + j] += dzr * step.x[j];
                    dx[j] += self.params[r * d + j] * dzr;
                }
                for k in 0..h {
                    self.grads[u_offset + r * h + k] += dzr * step.h_prev[k];
                    dh_next[k] += self.params[u_offset + r * h + k] * dzr;
                }
                self.grads[b_offset + r] += dzr;
            }
            d_inputs[t] = dx;
        }

        d_inputs
    }

    pub fn zero_grad(&mut self) {
        self.grads.iter_mut().for_each(|g| *g = 0.0);
    }

    pub fn apply_gradients(&mut self, optimizer: &mut Adam) {
        optimizer.step(&mut self.params, &self.grads);
    }

    #[cfg(test)]
    pub(crate) fn params_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }

    #[cfg(test)]
    pub(crate) fn grads(&self) -> &[f64] {
        &self.grads
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

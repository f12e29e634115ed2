//! Weight initialization helpers

use rand::Rng;

/// Glorot/Xavier uniform: `U(-limit, limit)`, `limit = sqrt(6 / (fan_in + fan_out))`
pub fn glorot_uniform<R: Rng>(rng: &mut R, fan_in: usize, fan_out: usize, count: usize) -> Vec<f64> {
    let limit = (6.0 / (fan_in + fan_out) as f64).sqrt();
    uniform(rng, limit, count)
}

/// `U(-limit, limit)`
pub fn uniform<R: Rng>(rng: &mut R, limit: f64, count: usize) -> Vec<f64> {
    (0..count).map(|_| rng.gen_range(-limit..=limit)).collect()
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

//! Min-max scaling
//!
//! `x' = (x - min) * scale + lo`, where `scale = (hi - lo) / (max - min)`.
//! A constant series uses `scale = hi - lo` so every value maps to `lo`.

use serde::{Deserialize, Serialize};

use super::error::ForecastError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    feature_range: (f64, f64),
    data_min: f64,
    data_max: f64,
    scale: f64,
}

impl MinMaxScaler {
    /// Fit to `values` with the default `[0, 1]` range
    pub fn fit(values: &[f64]) -> Result<Self, ForecastError> {
        Self::fit_with_range(values, (0.0, 1.0))
    }

    pub fn fit_with_range(values: &[f64], feature_range: (f64, f64)) -> Result<Self, ForecastError> {
        let (lo, hi) = feature_range;
        if !(lo < hi) {
            return Err(ForecastError::InvalidConfig(format!(
                "feature range ({}, {}) must be increasing",
                lo, hi
            )));
        }
        if values.is_empty() {
            return Err(ForecastError::EmptySeries);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::NonFinite(index));
        }

        let data_min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let data_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let data_range = data_max - data_min;
        let data_range = if data_range == 0.0 { 1.0 } else { data_range };

        Ok(Self {
            feature_range,
            data_min,
            data_max,
            scale: (hi - lo) / data_range,
        })
    }

    pub fn transform_one(&self, value: f64) -> f64 {
        (value - self.data_min) * self.scale + self.feature_range.0
    }

    pub fn inverse_one(&self, scaled: f64) -> f64 {
        (scaled - self.feature_range.0) / self.scale + self.data_min
    }

    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.transform_one(v)).collect()
    }

    pub fn inverse_transform(&self, scaled: &[f64]) -> Vec<f64> {
        scaled.iter().map(|&v| self.inverse_one(v)).collect()
    }
}

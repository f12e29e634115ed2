//! Two-layer LSTM next-step forecaster.
//!
//! LSTM(units, full sequence) -> LSTM(units, last state) -> Dense(1),
//! trained with MSE loss and Adam on `(window, next value)` pairs drawn
//! from a scaled series.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::dense::DenseLayer;
use super::error::ForecastError;
use super::lstm::LstmLayer;
use super::optimizer::Adam;

#[derive(Debug, Clone)]
pub struct ForecasterConfig {
    pub units: usize,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    /// Number of past observations fed per prediction
    pub lookback: usize,
    pub seed: u64,
}

impl Default for ForecasterConfig {
    fn default() -> Self {
        Self {
            units: 50,
            epochs: 100,
            batch_size: 32,
            learning_rate: 0.001,
            lookback: 1,
            seed: 42,
        }
    }
}

impl ForecasterConfig {
    fn validate(&self) -> Result<(), ForecastError> {
        if self.units == 0 {
            return Err(ForecastError::InvalidConfig("units must be > 0".to_string()));
        }
        if self.epochs == 0 {
            return Err(ForecastError::InvalidConfig("epochs must be > 0".to_string()));
        }
        if self.batch_size == 0 {
            return Err(ForecastError::InvalidConfig("batch_size must be > 0".to_string()));
        }
        if self.lookback == 0 {
            return Err(ForecastError::InvalidConfig("lookback must be > 0".to_string()));
        }
        if !(self.learning_rate > 0.0) {
            return Err(ForecastError::InvalidConfig(
                "learning_rate must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Mean squared error per epoch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingHistory {
    pub losses: Vec<f64>,
}

impl TrainingHistory {
    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last().copied()
    }
}

/// Sliding `(window, target)` pairs: `series[i..i+lookback] -> series[i+lookback]`
pub fn training_pairs(series: &[f64], lookback: usize) -> Result<Vec<(Vec<f64>, f64)>, ForecastError> {
    if series.len() < lookback + 1 {
        return Err(ForecastError::InsufficientData {
            needed: lookback + 1,
            got: series.len(),
        });
    }
    Ok(series
        .windows(lookback + 1)
        .map(|w| (w[..lookback].to_vec(), w[lookback]))
        .collect())
}

pub struct LstmForecaster {
    config: ForecasterConfig,
    encoder: LstmLayer,
    decoder: LstmLayer,
    head: DenseLayer,
    optimizers: [Adam; 3],
    rng: StdRng,
}

impl LstmForecaster {
    pub fn new(config: ForecasterConfig) -> Result<Self, ForecastError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let encoder = LstmLayer::new(1, config.units, &mut rng);
        let decoder = LstmLayer::new(config.units, config.units, &mut rng);
        let head = DenseLayer::new(config.units, &mut rng);
        let optimizers = [
            Adam::new(config.learning_rate),
            Adam::new(config.learning_rate),
            Adam::new(config.learning_rate),
        ];
        Ok(Self {
            config,
            encoder,
            decoder,
            head,
            optimizers,
            rng,
        })
    }

    /// Train on a scaled series; returns the per-epoch loss
    pub fn fit(&mut self, scaled: &[f64]) -> Result<TrainingHistory, ForecastError> {
        let pairs = training_pairs(scaled, self.config.lookback)?;
        let mut order: Vec<usize> = (0..pairs.len()).collect();
        let mut history = TrainingHistory::default();

        for epoch in 0..self.config.epochs {
            order.shuffle(&mut self.rng);
            let mut squared_error = 0.0;

            for batch in order.chunks(self.config.batch_size) {
                self.zero_grad();
                let scale = 2.0 / batch.len() as f64;
                for &index in batch {
                    let (window, target) = &pairs[index];
                    squared_error += self.accumulate_gradients(window, *target, scale);
                }
                self.apply_gradients();
            }

            let loss = squared_error / pairs.len() as f64;
            debug!(epoch = epoch + 1, loss = loss, "Forecaster epoch complete");
            history.losses.push(loss);
        }

        Ok(history)
    }

    /// Predict the value following `window`
    pub fn predict_window(&self, window: &[f64]) -> f64 {
        let inputs = to_inputs(window);
        let (encoded, _) = self.encoder.forward(&inputs);
        let (decoded, _) = self.decoder.forward(&encoded);
        match decoded.last() {
            Some(last) => self.head.forward(last),
            None => self.head.forward(&vec![0.0; self.config.units]),
        }
    }

    /// Predict the step after the end of `scaled`
    pub fn predict_next(&self, scaled: &[f64]) -> Result<f64, ForecastError> {
        let lookback = self.config.lookback;
        if scaled.len() < lookback {
            return Err(ForecastError::InsufficientData {
                needed: lookback,
                got: scaled.len(),
            });
        }
        Ok(self.predict_window(&scaled[scaled.len() - lookback..]))
    }

    /// Forward + backward for one sample; returns its squared error
    fn accumulate_gradients(&mut self, window: &[f64], target: f64, scale: f64) -> f64 {
        let inputs = to_inputs(window);
        let (encoded, encoder_cache) = self.encoder.forward(&inputs);
        let (decoded, decoder_cache) = self.decoder.forward(&encoded);
        let last = decoded.len() - 1;

        let prediction = self.head.forward(&decoded[last]);
        let error = prediction - target;

        let d_last = self.head.backward(&decoded[last], scale * error);
        let mut d_decoded = vec![vec![0.0; self.config.units]; decoded.len()];
        d_decoded[last] = d_last;
        let d_encoded = self.decoder.backward(&decoder_cache, &d_decoded);
        self.encoder.backward(&encoder_cache, &d_encoded);

        error * error
    }

    fn zero_grad(&mut self) {
        self.encoder.zero_grad();
        self.decoder.zero_grad();
        self.head.zero_grad();
    }

    fn apply_gradients(&mut self) {
        let [encoder_opt, decoder_opt, head_opt] = &mut self.optimizers;
        self.encoder.apply_gradients(encoder_opt);
        self.decoder.apply_gradients(decoder_opt);
        self.head.apply_gradients(head_opt);
    }
}

fn to_inputs(window: &[f64]) -> Vec<Vec<f64>> {
    window.iter().map(|&v| vec![v]).collect()
}

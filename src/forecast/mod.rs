//! Price forecasting: min-max scaling and a two-layer LSTM

pub mod dense;
pub mod error;
pub mod initializer;
pub mod lstm;
pub mod model;
pub mod optimizer;
pub mod scaler;

pub use error::ForecastError;
pub use model::{training_pairs, ForecasterConfig, LstmForecaster, TrainingHistory};
pub use scaler::MinMaxScaler;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("cannot fit a scaler to an empty series")]
    EmptySeries,
    #[error("series contains a non-finite value at index {0}")]
    NonFinite(usize),
    #[error("need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },
    #[error("invalid forecaster configuration: {0}")]
    InvalidConfig(String),
}

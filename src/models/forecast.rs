use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sentiment::SentimentScore;

/// Next-step price forecast in both scaled and price units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub scaled: f64,
    pub price: f64,
    pub last_close: f64,
    pub final_loss: f64,
    pub epochs: usize,
    pub observations: usize,
}

/// Everything one stock insight run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub ticker: String,
    pub forecast: Forecast,
    pub sentiment: Vec<SentimentScore>,
    pub generated_at: DateTime<Utc>,
}

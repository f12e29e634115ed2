//! Stock insight run: fetch -> scale -> train -> predict -> sentiment

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::InsightConfig;
use crate::forecast::{ForecastError, ForecasterConfig, LstmForecaster, MinMaxScaler};
use crate::models::{Forecast, InsightReport};
use crate::services::{PriceHistoryProvider, ProviderError, SentimentModel};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("market data: {0}")]
    MarketData(#[source] ProviderError),
    #[error("sentiment: {0}")]
    Sentiment(#[source] ProviderError),
    #[error("forecast: {0}")]
    Forecast(#[from] ForecastError),
    #[error("training task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Configuration for one insight run
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub ticker: String,
    pub range: String,
    pub headlines: Vec<String>,
    pub forecaster: ForecasterConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let insight = InsightConfig::default();
        Self::from(&insight)
    }
}

impl From<&InsightConfig> for RuntimeConfig {
    fn from(config: &InsightConfig) -> Self {
        Self {
            ticker: config.ticker.clone(),
            range: config.range.clone(),
            headlines: config.headlines.clone(),
            forecaster: ForecasterConfig {
                epochs: config.epochs,
                lookback: config.lookback,
                seed: config.seed,
                ..ForecasterConfig::default()
            },
        }
    }
}

pub struct InsightRuntime {
    config: RuntimeConfig,
    prices: Arc<dyn PriceHistoryProvider>,
    sentiment: Arc<dyn SentimentModel>,
}

impl InsightRuntime {
    pub fn new(
        config: RuntimeConfig,
        prices: Arc<dyn PriceHistoryProvider>,
        sentiment: Arc<dyn SentimentModel>,
    ) -> Self {
        Self {
            config,
            prices,
            sentiment,
        }
    }

    /// Execute every step once, in order. The first failure aborts the run.
    pub async fn run(&self) -> Result<InsightReport, RuntimeError> {
        let ticker = &self.config.ticker;

        let series = self
            .prices
            .daily_closes(ticker, &self.config.range)
            .await
            .map_err(RuntimeError::MarketData)?;
        info!(
            ticker = %ticker,
            provider = self.prices.name(),
            observations = series.len(),
            "Price history loaded"
        );

        let closes = series.closes();
        let forecaster_config = self.config.forecaster.clone();
        let forecast = tokio::task::spawn_blocking(move || forecast_next(&closes, forecaster_config))
            .await??;
        info!(
            ticker = %ticker,
            predicted = forecast.price,
            last_close = forecast.last_close,
            final_loss = forecast.final_loss,
            "Forecast complete"
        );

        let sentiment = self
            .sentiment
            .score(&self.config.headlines)
            .await
            .map_err(RuntimeError::Sentiment)?;
        info!(
            model = self.sentiment.name(),
            headlines = sentiment.len(),
            "Sentiment scored"
        );

        Ok(InsightReport {
            ticker: ticker.clone(),
            forecast,
            sentiment,
            generated_at: Utc::now(),
        })
    }
}

/// Scale the closes, train a fresh forecaster and predict the next close
/// in both scaled and price units.
pub fn forecast_next(closes: &[f64], config: ForecasterConfig) -> Result<Forecast, ForecastError> {
    let scaler = MinMaxScaler::fit(closes)?;
    let scaled = scaler.transform(closes);

    let epochs = config.epochs;
    let mut forecaster = LstmForecaster::new(config)?;
    let history = forecaster.fit(&scaled)?;
    let predicted = forecaster.predict_next(&scaled)?;

    Ok(Forecast {
        scaled: predicted,
        price: scaler.inverse_one(predicted),
        last_close: closes.last().copied().unwrap_or_default(),
        final_loss: history.final_loss().unwrap_or(f64::NAN),
        epochs,
        observations: closes.len(),
    })
}

//! Unit tests for the stock insight runtime

use sagefin::core::runtime::{forecast_next, InsightRuntime, RuntimeConfig, RuntimeError};
use sagefin::forecast::{ForecastError, ForecasterConfig};
use sagefin::services::{FixedSentimentModel, StaticPriceProvider};
use std::sync::Arc;

use crate::common::price_series;

fn quick_runtime_config(ticker: &str) -> RuntimeConfig {
    RuntimeConfig {
        ticker: ticker.to_string(),
        range: "5y".to_string(),
        headlines: vec![
            "Example news headline about AAPL".to_string(),
            "Supply chain worries weigh on shares".to_string(),
        ],
        forecaster: ForecasterConfig {
            units: 6,
            epochs: 10,
            ..ForecasterConfig::default()
        },
    }
}

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.ticker, "AAPL");
    assert_eq!(config.range, "5y");
    assert_eq!(config.headlines, vec!["Example news headline about AAPL".to_string()]);
    assert_eq!(config.forecaster.epochs, 100);
}

#[test]
fn test_forecast_is_reported_in_price_units() {
    let closes = price_series("AAPL", 80).closes();
    let forecast = forecast_next(
        &closes,
        ForecasterConfig {
            units: 6,
            epochs: 5,
            ..ForecasterConfig::default()
        },
    )
    .unwrap();

    let min = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let expected_price = forecast.scaled * (max - min) + min;
    assert!((forecast.price - expected_price).abs() < 1e-9);
    assert_eq!(forecast.last_close, *closes.last().unwrap());
    assert_eq!(forecast.observations, 80);
}

#[tokio::test]
async fn test_run_produces_forecast_and_sentiment() {
    let runtime = InsightRuntime::new(
        quick_runtime_config("AAPL"),
        Arc::new(StaticPriceProvider::new(price_series("AAPL", 60))),
        Arc::new(FixedSentimentModel::new(-1.0, 1.0)),
    );

    let report = runtime.run().await.unwrap();
    assert_eq!(report.ticker, "AAPL");
    assert_eq!(report.forecast.epochs, 10);
    assert!(report.forecast.price.is_finite());
    assert_eq!(report.sentiment.len(), 2);
    assert_eq!(report.sentiment[1].headline, "Supply chain worries weigh on shares");
    for score in &report.sentiment {
        assert!((score.total() - 1.0).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_market_data_failure_aborts_run() {
    let runtime = InsightRuntime::new(
        quick_runtime_config("MSFT"),
        Arc::new(StaticPriceProvider::new(price_series("AAPL", 60))),
        Arc::new(FixedSentimentModel::new(0.0, 0.0)),
    );
    assert!(matches!(
        runtime.run().await,
        Err(RuntimeError::MarketData(_))
    ));
}

#[tokio::test]
async fn test_single_observation_is_a_forecast_error() {
    let runtime = InsightRuntime::new(
        quick_runtime_config("AAPL"),
        Arc::new(StaticPriceProvider::new(price_series("AAPL", 1))),
        Arc::new(FixedSentimentModel::new(0.0, 0.0)),
    );
    assert!(matches!(runtime.run().await, Err(RuntimeError::Forecast(_))));
}

#[test]
fn test_zero_epochs_is_rejected_before_training() {
    let closes = price_series("AAPL", 40).closes();
    let result = forecast_next(
        &closes,
        ForecasterConfig {
            units: 4,
            epochs: 0,
            ..ForecasterConfig::default()
        },
    );
    assert!(matches!(result, Err(ForecastError::InvalidConfig(_))));
}

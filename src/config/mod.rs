//! Environment-driven configuration for both binaries.
//!
//! Values are read from the process environment (optionally seeded from a
//! `.env` file by the binaries via `dotenvy`). Every knob has a default so
//! both binaries run with no configuration at all.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL_PATH: &str = "models/classify.json";
pub const DEFAULT_TICKER: &str = "AAPL";
pub const DEFAULT_HEADLINE: &str = "Example news headline about AAPL";
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";
pub const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_HF_API_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Current deployment environment (`APP_ENV`), defaults to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Timeout applied to every outbound HTTP client.
pub fn http_timeout() -> Duration {
    Duration::from_secs(env_or("HTTP_TIMEOUT_SECONDS", 30))
}

/// Configuration for the classifier service
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub port: u16,
    pub model_path: PathBuf,
    /// Feature names to use when the model file does not carry them
    pub features: Option<Vec<String>>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            features: None,
        }
    }
}

impl ClassifierConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env_or("PORT", defaults.port),
            model_path: env::var("CLASSIFIER_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            features: env::var("CLASSIFIER_FEATURES")
                .ok()
                .map(|raw| parse_list(&raw, ','))
                .filter(|names| !names.is_empty()),
        }
    }
}

/// Configuration for the stock insight run
#[derive(Debug, Clone)]
pub struct InsightConfig {
    pub ticker: String,
    pub headlines: Vec<String>,
    pub range: String,
    pub epochs: usize,
    pub lookback: usize,
    pub seed: u64,
    pub sentiment_model: String,
    pub market_data_base_url: String,
    pub hf_api_base_url: String,
    pub hf_api_token: Option<String>,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            headlines: vec![DEFAULT_HEADLINE.to_string()],
            range: "5y".to_string(),
            epochs: 100,
            lookback: 1,
            seed: 42,
            sentiment_model: DEFAULT_SENTIMENT_MODEL.to_string(),
            market_data_base_url: DEFAULT_MARKET_DATA_BASE_URL.to_string(),
            hf_api_base_url: DEFAULT_HF_API_BASE_URL.to_string(),
            hf_api_token: None,
        }
    }
}

impl InsightConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let headlines = env::var("NEWS_HEADLINES")
            .ok()
            .map(|raw| parse_list(&raw, '|'))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.headlines);

        Self {
            ticker: env_string("STOCK_TICKER", &defaults.ticker),
            headlines,
            range: defaults.range,
            epochs: env_or("FORECAST_EPOCHS", defaults.epochs),
            lookback: env_or("FORECAST_LOOKBACK", defaults.lookback).max(1),
            seed: env_or("FORECAST_SEED", defaults.seed),
            sentiment_model: env_string("SENTIMENT_MODEL", &defaults.sentiment_model),
            market_data_base_url: env_string(
                "MARKET_DATA_BASE_URL",
                &defaults.market_data_base_url,
            ),
            hf_api_base_url: env_string("HF_API_BASE_URL", &defaults.hf_api_base_url),
            hf_api_token: env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}

/// Split a delimited list, trimming entries and dropping empty ones
pub fn parse_list(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

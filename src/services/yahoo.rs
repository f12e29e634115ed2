//! Yahoo Finance chart API price history provider

use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::models::market::{PricePoint, PriceSeries};
use crate::services::error::ProviderError;
use crate::services::market_data::PriceHistoryProvider;

const USER_AGENT: &str = concat!("sagefin/", env!("CARGO_PKG_VERSION"));

pub struct YahooFinanceProvider {
    base_url: String,
    client: Client,
}

impl YahooFinanceProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, ticker)
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

fn series_from_chart(ticker: &str, envelope: ChartEnvelope) -> Result<PriceSeries, ProviderError> {
    if let Some(err) = envelope.chart.error {
        return Err(ProviderError::NoData(format!(
            "{} ({}): {}",
            ticker, err.code, err.description
        )));
    }
    let result = envelope
        .chart
        .result
        .and_then(|mut results| if results.is_empty() { None } else { Some(results.remove(0)) })
        .ok_or_else(|| ProviderError::NoData(format!("no chart result for {}", ticker)))?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();
    if closes.len() != result.timestamp.len() {
        return Err(ProviderError::Malformed(format!(
            "{} timestamps but {} closes",
            result.timestamp.len(),
            closes.len()
        )));
    }

    let points: Vec<PricePoint> = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let close = close.filter(|c| c.is_finite())?;
            let timestamp = DateTime::from_timestamp(ts, 0)?;
            Some(PricePoint::new(timestamp, close))
        })
        .collect();

    if points.is_empty() {
        return Err(ProviderError::NoData(format!("no closing prices for {}", ticker)));
    }
    Ok(PriceSeries::new(ticker, points))
}

#[async_trait::async_trait]
impl PriceHistoryProvider for YahooFinanceProvider {
    async fn daily_closes(&self, ticker: &str, range: &str) -> Result<PriceSeries, ProviderError> {
        let url = self.chart_url(ticker);
        debug!(url = %url, range = range, "Fetching price history");

        let response = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", "1d")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed = serde_json::from_str::<ChartEnvelope>(&body);

        if !status.is_success() {
            // Unknown tickers come back as 404 with a chart.error payload
            if let Ok(envelope) = parsed {
                if envelope.chart.error.is_some() {
                    return series_from_chart(ticker, envelope);
                }
            }
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope = parsed.map_err(|e| ProviderError::Malformed(e.to_string()))?;
        let series = series_from_chart(ticker, envelope)?;
        info!(
            ticker = ticker,
            points = series.len(),
            "Fetched daily closes"
        );
        Ok(series)
    }

    fn name(&self) -> &'static str {
        "yahoo-finance"
    }
}

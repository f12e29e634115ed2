//! Price history provider interface

use crate::models::market::PriceSeries;
use crate::services::error::ProviderError;

#[async_trait::async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Daily closing prices for `ticker` over `range` (e.g. `5y`), oldest first
    async fn daily_closes(&self, ticker: &str, range: &str) -> Result<PriceSeries, ProviderError>;

    fn name(&self) -> &'static str;
}

/// Serves a fixed series, for offline runs and tests
pub struct StaticPriceProvider {
    series: PriceSeries,
}

impl StaticPriceProvider {
    pub fn new(series: PriceSeries) -> Self {
        Self { series }
    }
}

#[async_trait::async_trait]
impl PriceHistoryProvider for StaticPriceProvider {
    async fn daily_closes(&self, ticker: &str, _range: &str) -> Result<PriceSeries, ProviderError> {
        if !self.series.ticker.eq_ignore_ascii_case(ticker) {
            return Err(ProviderError::NoData(format!("no price history for {}", ticker)));
        }
        Ok(self.series.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

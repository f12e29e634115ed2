//! Sagefin Stock Insight
//!
//! Single run: fetch five years of daily closes, train a two-layer LSTM,
//! predict the next close and score headline sentiment.
//!
//! Pass `--json` for machine-readable output.

use dotenvy::dotenv;
use sagefin::config::{self, InsightConfig};
use sagefin::core::runtime::{InsightRuntime, RuntimeConfig};
use sagefin::logging::{self, LogTarget};
use sagefin::report::{ReportFormat, Reporter};
use sagefin::services::{HuggingFaceSentimentClient, YahooFinanceProvider};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging_to(LogTarget::Stderr);

    let format = if std::env::args().skip(1).any(|arg| arg == "--json") {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    };

    let insight = InsightConfig::from_env();
    info!(
        ticker = %insight.ticker,
        epochs = insight.epochs,
        lookback = insight.lookback,
        headlines = insight.headlines.len(),
        "Starting stock insight run"
    );

    let timeout = config::http_timeout();
    let prices = YahooFinanceProvider::new(&insight.market_data_base_url, timeout)?;
    let sentiment = HuggingFaceSentimentClient::new(
        &insight.hf_api_base_url,
        &insight.sentiment_model,
        insight.hf_api_token.clone(),
        timeout,
    )?;

    let runtime = InsightRuntime::new(
        RuntimeConfig::from(&insight),
        Arc::new(prices),
        Arc::new(sentiment),
    );

    let report = match runtime.run().await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Stock insight run failed");
            return Err(e.into());
        }
    };

    let stdout = std::io::stdout();
    Reporter::new(stdout.lock(), format).write(&report)?;
    Ok(())
}

//! Integration tests for the Yahoo chart API provider

use sagefin::services::{PriceHistoryProvider, ProviderError, YahooFinanceProvider};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> YahooFinanceProvider {
    YahooFinanceProvider::new(server.uri(), Duration::from_secs(5)).expect("client builds")
}

#[tokio::test]
async fn fetches_five_years_of_daily_closes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .and(query_param("range", "5y"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chart": {
                "result": [{
                    "meta": {"symbol": "AAPL", "currency": "USD"},
                    "timestamp": [1700172800, 1700000000, 1700086400],
                    "indicators": {"quote": [{"close": [191.5, 189.7, null]}]}
                }],
                "error": null
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let series = provider(&server).daily_closes("AAPL", "5y").await.unwrap();
    assert_eq!(series.ticker, "AAPL");
    assert_eq!(series.closes(), vec![189.7, 191.5]);
    assert_eq!(series.last_close(), Some(191.5));
}

#[tokio::test]
async fn unknown_ticker_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NOPE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        })))
        .mount(&server)
        .await;

    let err = provider(&server).daily_closes("NOPE", "5y").await.unwrap_err();
    assert!(matches!(err, ProviderError::NoData(_)), "{:?}", err);
}

#[tokio::test]
async fn server_error_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = provider(&server).daily_closes("AAPL", "5y").await.unwrap_err();
    match err {
        ProviderError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

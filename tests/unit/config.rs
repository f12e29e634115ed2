//! Unit tests for configuration defaults and list parsing

use sagefin::config::{parse_list, ClassifierConfig, InsightConfig};

#[test]
fn test_classifier_defaults() {
    let config = ClassifierConfig::default();
    assert_eq!(config.port, 5000);
    assert!(config.model_path.ends_with("classify.json"));
    assert!(config.features.is_none());
}

#[test]
fn test_insight_defaults() {
    let config = InsightConfig::default();
    assert_eq!(config.ticker, "AAPL");
    assert_eq!(config.range, "5y");
    assert_eq!(config.epochs, 100);
    assert_eq!(config.sentiment_model, "distilbert-base-uncased-finetuned-sst-2-english");
}

#[test]
fn test_parse_list_trims_and_drops_empties() {
    assert_eq!(
        parse_list(" amount, merchant_code ,,", ','),
        vec!["amount".to_string(), "merchant_code".to_string()]
    );
    assert_eq!(
        parse_list("Apple rallies | | Fed holds rates", '|'),
        vec!["Apple rallies".to_string(), "Fed holds rates".to_string()]
    );
}

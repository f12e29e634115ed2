//! Unit tests for the decode -> predict -> map pipeline

use sagefin::classifier::{ClassifyError, DecodeError, TransactionClassifier};
use sagefin::config::ClassifierConfig;
use sagefin::models::CategoryLabel;
use serde_json::json;
use std::sync::Arc;

use crate::common::{fixture_classifier, fixture_model_path, ConstantModel};

#[test]
fn test_model_predicting_class_two_yields_household() {
    let classifier = TransactionClassifier::new(Arc::new(ConstantModel::new(2)));
    let labels = classifier
        .classify(&json!([{"amount": 42.0, "merchant_code": 7}]))
        .unwrap();
    assert_eq!(labels, vec![CategoryLabel::Household]);
}

#[test]
fn test_demo_model_classifies_reference_row() {
    let labels = fixture_classifier()
        .classify(&json!([{"amount": 42.0, "merchant_code": 7}]))
        .unwrap();
    assert_eq!(labels, vec![CategoryLabel::Household]);
}

#[test]
fn test_output_length_and_order_follow_input() {
    let payload = json!([
        {"amount": 20.0, "merchant_code": 15},
        {"amount": 20.0, "merchant_code": 0},
        {"amount": 2500.0, "merchant_code": 1},
        {"amount": 20.0, "merchant_code": 0},
        {"amount": 20.0, "merchant_code": 3}
    ]);
    let labels = fixture_classifier().classify(&payload).unwrap();
    assert_eq!(
        labels,
        vec![
            CategoryLabel::Transportation,
            CategoryLabel::Apparel,
            CategoryLabel::Salary,
            CategoryLabel::Apparel,
            CategoryLabel::Food,
        ]
    );
}

#[test]
fn test_columnar_payload_matches_records() {
    let classifier = fixture_classifier();
    let records = classifier
        .classify(&json!([
            {"amount": 42.0, "merchant_code": 7},
            {"amount": 20.0, "merchant_code": 9}
        ]))
        .unwrap();
    let columns = classifier
        .classify(&json!({"amount": [42.0, 20.0], "merchant_code": [7, 9]}))
        .unwrap();
    assert_eq!(records, columns);
}

#[test]
fn test_classification_is_deterministic() {
    let classifier = fixture_classifier();
    let payload = json!([{"amount": 12.0, "merchant_code": 5}, {"amount": 3.0, "merchant_code": 11}]);
    let first = classifier.classify(&payload).unwrap();
    let second = classifier.classify(&payload).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_class_id_fails_the_batch() {
    let classifier = TransactionClassifier::new(Arc::new(ConstantModel::new(6)));
    let err = classifier
        .classify(&json!([{"amount": 1.0, "merchant_code": 1}]))
        .unwrap_err();
    assert!(matches!(err, ClassifyError::UnknownCategory { row: 0, .. }));
    assert_eq!(err.kind(), "unknown_category");
}

#[test]
fn test_schema_mismatch_is_reported() {
    let err = fixture_classifier()
        .classify(&json!([{"amount": 1.0}]))
        .unwrap_err();
    assert!(matches!(
        err,
        ClassifyError::Decode(DecodeError::MissingField { row: 0, .. })
    ));
    assert_eq!(err.kind(), "schema_mismatch");
}

#[test]
fn test_empty_batch_returns_no_labels() {
    assert!(fixture_classifier().classify(&json!([])).unwrap().is_empty());
}

#[test]
fn test_from_config_requires_model_file() {
    let missing = ClassifierConfig {
        model_path: "missing/classify.json".into(),
        ..ClassifierConfig::default()
    };
    assert!(TransactionClassifier::from_config(&missing).is_err());

    let present = ClassifierConfig {
        model_path: fixture_model_path(),
        ..ClassifierConfig::default()
    };
    let classifier = TransactionClassifier::from_config(&present).unwrap();
    assert_eq!(classifier.summary().num_class, 6);
}

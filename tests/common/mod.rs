//! Shared fixtures for unit and integration tests

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use sagefin::classifier::{CategoryModel, ModelError, TransactionClassifier, TreeEnsemble};
use sagefin::models::{FeatureMatrix, PricePoint, PriceSeries};
use std::path::PathBuf;
use std::sync::Arc;

/// Demo model shipped in `models/`: features `amount`, `merchant_code`.
/// merchant_code buckets: <2 Apparel, <4 Food, <8 Household, <12 Tourism,
/// otherwise Transportation; amount >= 1000 wins as Salary.
pub fn fixture_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/classify.json")
}

pub fn fixture_classifier() -> TransactionClassifier {
    let model = TreeEnsemble::load(fixture_model_path(), None).expect("fixture model loads");
    TransactionClassifier::new(Arc::new(model))
}

/// Predicts the same class id for every row
pub struct ConstantModel {
    pub class_id: u32,
    pub features: Vec<String>,
}

impl ConstantModel {
    pub fn new(class_id: u32) -> Self {
        Self {
            class_id,
            features: vec!["amount".to_string(), "merchant_code".to_string()],
        }
    }
}

impl CategoryModel for ConstantModel {
    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn num_class(&self) -> usize {
        self.class_id as usize + 1
    }

    fn num_trees(&self) -> usize {
        0
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<u32>, ModelError> {
        Ok(vec![self.class_id; features.n_rows()])
    }
}

/// Gently rising daily closes with a small oscillation
pub fn price_series(ticker: &str, days: usize) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2021, 1, 4, 0, 0, 0).unwrap();
    let points = (0..days)
        .map(|i| {
            let close = 100.0 + i as f64 * 0.5 + (i as f64 / 3.0).sin() * 2.0;
            PricePoint::new(start + Duration::days(i as i64), close)
        })
        .collect();
    PriceSeries::new(ticker, points)
}

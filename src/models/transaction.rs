//! Transaction rows and the tabular form fed to the classifier

use std::collections::BTreeMap;

/// A single decoded feature cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Bool(bool),
    /// JSON `null`; the tree model routes it down the default branch
    Missing,
}

impl FeatureValue {
    pub fn as_f32(self) -> f32 {
        match self {
            FeatureValue::Number(v) => v as f32,
            FeatureValue::Bool(true) => 1.0,
            FeatureValue::Bool(false) => 0.0,
            FeatureValue::Missing => f32::NAN,
        }
    }
}

/// One transaction row keyed by feature name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionRecord {
    pub fields: BTreeMap<String, FeatureValue>,
}

impl TransactionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.fields.get(name).copied()
    }
}

/// Row-major `f32` matrix whose columns follow the model's feature order.
/// Missing cells hold `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    feature_names: Vec<String>,
    values: Vec<f32>,
    rows: usize,
}

impl FeatureMatrix {
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            feature_names,
            values: Vec::new(),
            rows: 0,
        }
    }

    /// Append a row; `row` must have one value per feature
    pub fn push_row(&mut self, row: &[f32]) {
        debug_assert_eq!(row.len(), self.feature_names.len());
        self.values.extend_from_slice(row);
        self.rows += 1;
    }

    pub fn row(&self, index: usize) -> &[f32] {
        let width = self.feature_names.len();
        &self.values[index * width..(index + 1) * width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

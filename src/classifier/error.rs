use thiserror::Error;

use crate::models::UnknownCategory;

/// Loading or evaluating the tree model failed
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("model file is not a valid XGBoost JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid model: {0}")]
    Invalid(String),
    #[error("unsupported objective `{0}` (expected multi:softmax or multi:softprob)")]
    UnsupportedObjective(String),
    #[error("model has no feature names; set CLASSIFIER_FEATURES")]
    MissingFeatureNames,
    #[error("row has {got} features but the model expects {expected}")]
    FeatureCount { expected: usize, got: usize },
}

/// The request body could not be turned into the model's feature table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("request body must be an array of records or an object of equal-length columns")]
    UnsupportedShape,
    #[error("row {row} is not a JSON object")]
    RowNotObject { row: usize },
    #[error("row {row} is missing feature `{field}`")]
    MissingField { row: usize, field: String },
    #[error("row {row} has unknown feature `{field}`")]
    UnknownField { row: usize, field: String },
    #[error("row {row} feature `{field}` must be a number, boolean or null")]
    InvalidValue { row: usize, field: String },
    #[error("column `{field}` must be an array")]
    ColumnNotArray { field: String },
    #[error("column `{field}` has {got} values, expected {expected}")]
    ColumnLength {
        field: String,
        expected: usize,
        got: usize,
    },
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("row {row}: {source}")]
    UnknownCategory {
        row: usize,
        #[source]
        source: UnknownCategory,
    },
}

impl ClassifyError {
    /// Short machine-readable kind, used in responses and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifyError::Decode(_) => "schema_mismatch",
            ClassifyError::Model(ModelError::FeatureCount { .. }) => "schema_mismatch",
            ClassifyError::Model(_) => "model_error",
            ClassifyError::UnknownCategory { .. } => "unknown_category",
        }
    }
}

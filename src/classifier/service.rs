//! Classification pipeline: decode -> predict -> map

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::booster::{CategoryModel, TreeEnsemble};
use super::error::{ClassifyError, ModelError};
use super::mapper::CategoryMapper;
use super::parser::RequestParser;
use crate::config::ClassifierConfig;
use crate::models::CategoryLabel;

/// Shape of the loaded model, reported by `/health`
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub num_class: usize,
    pub num_trees: usize,
    pub features: Vec<String>,
}

/// Read-only service context shared by all requests
pub struct TransactionClassifier {
    parser: RequestParser,
    model: Arc<dyn CategoryModel>,
    mapper: CategoryMapper,
}

impl TransactionClassifier {
    pub fn new(model: Arc<dyn CategoryModel>) -> Self {
        let parser = RequestParser::new(model.feature_names().to_vec());
        Self {
            parser,
            model,
            mapper: CategoryMapper::new(),
        }
    }

    /// Load the tree model named by the config. Fails if the file is absent.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ModelError> {
        let model = TreeEnsemble::load(&config.model_path, config.features.clone())?;
        info!(
            path = %config.model_path.display(),
            num_class = model.num_class(),
            num_trees = model.num_trees(),
            features = ?model.feature_names(),
            "Loaded classification model"
        );
        Ok(Self::new(Arc::new(model)))
    }

    /// Classify a request body; one label per row, in row order
    pub fn classify(&self, payload: &Value) -> Result<Vec<CategoryLabel>, ClassifyError> {
        let features = self.parser.decode(payload)?;
        if features.is_empty() {
            return Ok(Vec::new());
        }
        let ids = self.model.predict(&features)?;
        debug!(rows = features.n_rows(), "Predicted class ids");
        self.mapper.map_all(&ids)
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            num_class: self.model.num_class(),
            num_trees: self.model.num_trees(),
            features: self.model.feature_names().to_vec(),
        }
    }
}

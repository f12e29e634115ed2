//! Transaction classification (request parsing, tree model, label mapping)

pub mod booster;
pub mod error;
pub mod mapper;
pub mod parser;
pub mod service;

pub use booster::{CategoryModel, Objective, TreeEnsemble};
pub use error::{ClassifyError, DecodeError, ModelError};
pub use mapper::CategoryMapper;
pub use parser::RequestParser;
pub use service::{ModelSummary, TransactionClassifier};

//! sagefin - transaction classification service and stock insight run.
//!
//! Two independent pipelines share this crate:
//! - `classifier`: decodes transaction batches and labels them with a
//!   gradient-boosted-tree model (served by `classifier-server`)
//! - `forecast` + `services`: fetches price history, trains a small LSTM and
//!   scores headline sentiment (run by `stock-insight`)

pub mod classifier;
pub mod config;
pub mod core;
pub mod forecast;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod report;
pub mod services;

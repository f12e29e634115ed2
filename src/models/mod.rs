//! Shared data models spanning both pipelines.

pub mod category;
pub mod forecast;
pub mod market;
pub mod sentiment;
pub mod transaction;

pub use category::{CategoryLabel, UnknownCategory};
pub use forecast::{Forecast, InsightReport};
pub use market::{PricePoint, PriceSeries};
pub use sentiment::SentimentScore;
pub use transaction::{FeatureMatrix, FeatureValue, TransactionRecord};

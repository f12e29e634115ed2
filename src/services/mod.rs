//! External data and model providers

pub mod error;
pub mod huggingface;
pub mod market_data;
pub mod sentiment;
pub mod yahoo;

pub use error::ProviderError;
pub use huggingface::HuggingFaceSentimentClient;
pub use market_data::{PriceHistoryProvider, StaticPriceProvider};
pub use sentiment::{FixedSentimentModel, SentimentModel};
pub use yahoo::YahooFinanceProvider;

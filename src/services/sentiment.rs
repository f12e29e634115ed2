//! Headline sentiment interface

use crate::models::sentiment::SentimentScore;
use crate::services::error::ProviderError;

#[async_trait::async_trait]
pub trait SentimentModel: Send + Sync {
    /// One score per headline, in input order
    async fn score(&self, headlines: &[String]) -> Result<Vec<SentimentScore>, ProviderError>;

    fn name(&self) -> &str;
}

/// Scores every headline with the same fixed logits
pub struct FixedSentimentModel {
    negative_logit: f64,
    positive_logit: f64,
}

impl FixedSentimentModel {
    pub fn new(negative_logit: f64, positive_logit: f64) -> Self {
        Self {
            negative_logit,
            positive_logit,
        }
    }
}

#[async_trait::async_trait]
impl SentimentModel for FixedSentimentModel {
    async fn score(&self, headlines: &[String]) -> Result<Vec<SentimentScore>, ProviderError> {
        Ok(headlines
            .iter()
            .map(|h| SentimentScore::from_logits(h.clone(), self.negative_logit, self.positive_logit))
            .collect())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

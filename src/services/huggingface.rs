//! Hugging Face inference API sentiment client.
//!
//! Requests raw logits (`function_to_apply: none`) so the probability
//! distribution is produced locally by `softmax`.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use crate::models::sentiment::SentimentScore;
use crate::services::error::ProviderError;
use crate::services::sentiment::SentimentModel;

pub struct HuggingFaceSentimentClient {
    base_url: String,
    model: String,
    token: Option<String>,
    client: Client,
}

impl HuggingFaceSentimentClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, model, token, client))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        model: impl Into<String>,
        token: Option<String>,
        client: Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            token,
            client,
        }
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LabelLogit {
    label: String,
    score: f64,
}

/// A batch returns one list per input; a single input may come back flat
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Batch(Vec<Vec<LabelLogit>>),
    Single(Vec<LabelLogit>),
}

fn logit_for(headline: &str, logits: &[LabelLogit], label: &str) -> Result<f64, ProviderError> {
    logits
        .iter()
        .find(|l| l.label.eq_ignore_ascii_case(label))
        .map(|l| l.score)
        .ok_or_else(|| {
            ProviderError::Malformed(format!("no {} logit for headline {:?}", label, headline))
        })
}

fn scores_from_response(
    headlines: &[String],
    response: ClassificationResponse,
) -> Result<Vec<SentimentScore>, ProviderError> {
    let per_input = match response {
        ClassificationResponse::Batch(batch) => batch,
        ClassificationResponse::Single(single) => vec![single],
    };
    if per_input.len() != headlines.len() {
        return Err(ProviderError::Malformed(format!(
            "{} results for {} headlines",
            per_input.len(),
            headlines.len()
        )));
    }

    headlines
        .iter()
        .zip(per_input)
        .map(|(headline, logits)| {
            let negative = logit_for(headline, &logits, "NEGATIVE")?;
            let positive = logit_for(headline, &logits, "POSITIVE")?;
            Ok(SentimentScore::from_logits(headline.clone(), negative, positive))
        })
        .collect()
}

#[async_trait::async_trait]
impl SentimentModel for HuggingFaceSentimentClient {
    async fn score(&self, headlines: &[String]) -> Result<Vec<SentimentScore>, ProviderError> {
        if headlines.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.model_url();
        debug!(url = %url, headlines = headlines.len(), "Requesting sentiment logits");

        let mut request = self.client.post(&url).json(&json!({
            "inputs": headlines,
            "parameters": {"function_to_apply": "none", "top_k": null}
        }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ClassificationResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
        let scores = scores_from_response(headlines, parsed)?;
        info!(model = %self.model, headlines = scores.len(), "Scored headline sentiment");
        Ok(scores)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

use serde::{Deserialize, Serialize};

/// Two-class sentiment distribution for one headline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub headline: String,
    pub negative: f64,
    pub positive: f64,
}

impl SentimentScore {
    /// Build a score from raw `[negative, positive]` logits
    pub fn from_logits(headline: impl Into<String>, negative: f64, positive: f64) -> Self {
        let probs = softmax(&[negative, positive]);
        Self {
            headline: headline.into(),
            negative: probs[0],
            positive: probs[1],
        }
    }

    pub fn total(&self) -> f64 {
        self.negative + self.positive
    }

    pub fn dominant_label(&self) -> &'static str {
        if self.positive >= self.negative {
            "POSITIVE"
        } else {
            "NEGATIVE"
        }
    }
}

/// Numerically stable softmax
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    if logits.is_empty() {
        return Vec::new();
    }
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

//! Unit tests for sentiment scores and softmax

use sagefin::models::sentiment::softmax;
use sagefin::models::SentimentScore;

#[test]
fn test_scores_form_a_distribution() {
    for (neg, pos) in [(0.0, 0.0), (-4.2, 3.9), (12.0, -7.5), (800.0, 799.0)] {
        let score = SentimentScore::from_logits("headline", neg, pos);
        assert!((score.total() - 1.0).abs() < 1e-9, "{:?}", score);
        assert!(score.negative >= 0.0 && score.positive >= 0.0);
    }
}

#[test]
fn test_larger_logit_dominates() {
    let score = SentimentScore::from_logits("Shares surge", -1.5, 2.5);
    assert!(score.positive > score.negative);
    assert_eq!(score.dominant_label(), "POSITIVE");
}

#[test]
fn test_softmax_is_stable_for_large_logits() {
    let probs = softmax(&[1000.0, 1000.0]);
    assert_eq!(probs, vec![0.5, 0.5]);
    assert!(softmax(&[]).is_empty());
}

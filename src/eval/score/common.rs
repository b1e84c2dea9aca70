//! Zero-division-safe confusion metrics.
//!
//! Precision and recall degrade to 0 instead of dividing by zero. Rare or
//! absent classes thereby score 0, and downstream averaging can rely on
//! every score being a number.

/// Precision from confusion counts; 0 when there are no positive predictions.
pub fn precision_score(true_positive: u64, false_positive: u64) -> f64 {
    let denominator = true_positive + false_positive;
    if denominator == 0 {
        return 0.0;
    }
    true_positive as f64 / denominator as f64
}

/// Recall from confusion counts; 0 when there are no positive samples.
pub fn recall_score(true_positive: u64, false_negative: u64) -> f64 {
    let denominator = true_positive + false_negative;
    if denominator == 0 {
        return 0.0;
    }
    true_positive as f64 / denominator as f64
}

/// F1 score from confusion counts; 0 when precision and recall are both 0.
pub fn f1_score(true_positive: u64, false_positive: u64, false_negative: u64) -> f64 {
    let precision = precision_score(true_positive, false_positive);
    let recall = recall_score(true_positive, false_negative);
    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}

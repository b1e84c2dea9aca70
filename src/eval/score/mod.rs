//! Score functions for evaluating predicted subject probabilities.
//!
//! The batched scores in [`batched`] can be used standalone for streaming
//! evaluation; the constructors here wrap them into the closure form the
//! evaluation pipeline consumes, where each score sees exactly one batch.

pub mod batched;
pub mod common;


pub use batched::{
    default_thresholds, BatchedBestThresholdScore, BatchedConfusionScore,
    BatchedIncidenceDecisionScore, BatchedPerClassConfusionScore, ConfusionMetric,
};

use crate::common::score::{OverallScoreFn, ProbabilitiesScore};
use crate::eval::incidence::IncidenceDecision;

/// Build a pipeline score function from a batched probabilities score.
///
/// A fresh score instance is created per call; the true incidence matrix is
/// lifted to a probability matrix of zeros and ones before being fed to it.
pub fn probabilities_score_fn<P, F>(generator: F) -> OverallScoreFn
where
    P: ProbabilitiesScore,
    F: Fn() -> P + 'static,
{
    Box::new(move |true_incidence, predicted_probabilities| {
        let mut score = generator();
        let true_probabilities = true_incidence.mapv(f64::from);
        score.add_batch(true_probabilities.view(), predicted_probabilities)?;
        Ok(score.compute())
    })
}

/// Confusion metric at a fixed decision threshold.
pub fn threshold_score_fn(metric: ConfusionMetric, threshold: f64) -> OverallScoreFn {
    probabilities_score_fn(move || {
        BatchedIncidenceDecisionScore::new(
            IncidenceDecision::Threshold(threshold),
            BatchedConfusionScore::new(metric),
        )
    })
}

/// Confusion metric under a top-k incidence decision.
pub fn top_k_score_fn(metric: ConfusionMetric, k: usize) -> OverallScoreFn {
    probabilities_score_fn(move || {
        BatchedIncidenceDecisionScore::new(
            IncidenceDecision::TopK(k),
            BatchedConfusionScore::new(metric),
        )
    })
}

/// Confusion metric at the threshold maximizing F1 over the default grid.
pub fn best_threshold_score_fn(metric: ConfusionMetric) -> OverallScoreFn {
    probabilities_score_fn(move || {
        BatchedBestThresholdScore::new(move || BatchedConfusionScore::new(metric))
    })
}

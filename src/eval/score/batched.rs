//! Batched confusion scores over streamed incidence and probability matrices.
//!
//! Every score in this module accumulates additive confusion counts, so a
//! prediction stream can be evaluated batch by batch without holding the
//! full matrices in memory.

use log::debug;
use ndarray::{Array1, ArrayView2};

use super::common::{f1_score, precision_score, recall_score};
use crate::common::score::{IncidenceScore, PerClassIncidenceScore, ProbabilitiesScore};
use crate::error::{Error, Result};
use crate::eval::incidence::IncidenceDecision;

/// Metric derived from accumulated confusion counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfusionMetric {
    /// tp / (tp + fp), 0 when undefined
    Precision,
    /// tp / (tp + fn), 0 when undefined
    Recall,
    /// Harmonic mean of precision and recall, 0 when undefined
    F1,
}

impl ConfusionMetric {
    fn from_counts(self, true_positive: u64, false_positive: u64, false_negative: u64) -> f64 {
        match self {
            ConfusionMetric::Precision => precision_score(true_positive, false_positive),
            ConfusionMetric::Recall => recall_score(true_positive, false_negative),
            ConfusionMetric::F1 => f1_score(true_positive, false_positive, false_negative),
        }
    }
}

fn check_pair_shape<A, B>(truth: &ArrayView2<'_, A>, predicted: &ArrayView2<'_, B>) -> Result<()> {
    if truth.dim() != predicted.dim() {
        return Err(Error::ShapeMismatch {
            expected: truth.dim(),
            actual: predicted.dim(),
        });
    }
    Ok(())
}

/// Aggregate confusion score accumulated over incidence-matrix batches.
///
/// Counts are only ever incremented; `compute` never mutates them.
#[derive(Clone, Debug)]
pub struct BatchedConfusionScore {
    metric: ConfusionMetric,
    true_positive: u64,
    false_positive: u64,
    false_negative: u64,
}

impl BatchedConfusionScore {
    /// Create an empty confusion score for the given metric.
    pub fn new(metric: ConfusionMetric) -> Self {
        Self {
            metric,
            true_positive: 0,
            false_positive: 0,
            false_negative: 0,
        }
    }

    /// Accumulated (tp, fp, fn) counts.
    pub fn counts(&self) -> (u64, u64, u64) {
        (self.true_positive, self.false_positive, self.false_negative)
    }
}

impl IncidenceScore for BatchedConfusionScore {
    fn add_batch(
        &mut self,
        true_incidence: ArrayView2<'_, u8>,
        predicted_incidence: ArrayView2<'_, u8>,
    ) -> Result<()> {
        check_pair_shape(&true_incidence, &predicted_incidence)?;
        for (&truth, &predicted) in true_incidence.iter().zip(predicted_incidence.iter()) {
            match (truth != 0, predicted != 0) {
                (true, true) => self.true_positive += 1,
                (false, true) => self.false_positive += 1,
                (true, false) => self.false_negative += 1,
                (false, false) => {}
            }
        }
        Ok(())
    }

    fn compute(&self) -> f64 {
        self.metric
            .from_counts(self.true_positive, self.false_positive, self.false_negative)
    }
}

/// Per-class count vectors, sized lazily from the first batch.
#[derive(Clone, Debug)]
enum PerClassCounts {
    Empty,
    Accumulating {
        true_positive: Array1<u64>,
        false_positive: Array1<u64>,
        false_negative: Array1<u64>,
    },
}

/// Per-class confusion score accumulated over incidence-matrix batches.
///
/// The number of classes is discovered from the column count of the first
/// batch; later batches must match it.
#[derive(Clone, Debug)]
pub struct BatchedPerClassConfusionScore {
    metric: ConfusionMetric,
    counts: PerClassCounts,
}

impl BatchedPerClassConfusionScore {
    /// Create an empty per-class confusion score for the given metric.
    pub fn new(metric: ConfusionMetric) -> Self {
        Self {
            metric,
            counts: PerClassCounts::Empty,
        }
    }
}

impl PerClassIncidenceScore for BatchedPerClassConfusionScore {
    fn add_batch(
        &mut self,
        true_incidence: ArrayView2<'_, u8>,
        predicted_incidence: ArrayView2<'_, u8>,
    ) -> Result<()> {
        check_pair_shape(&true_incidence, &predicted_incidence)?;
        let columns = true_incidence.ncols();

        if let PerClassCounts::Empty = self.counts {
            self.counts = PerClassCounts::Accumulating {
                true_positive: Array1::zeros(columns),
                false_positive: Array1::zeros(columns),
                false_negative: Array1::zeros(columns),
            };
        }
        let PerClassCounts::Accumulating {
            true_positive,
            false_positive,
            false_negative,
        } = &mut self.counts
        else {
            unreachable!("counts initialized above");
        };

        if true_positive.len() != columns {
            return Err(Error::ShapeMismatch {
                expected: (true_incidence.nrows(), true_positive.len()),
                actual: true_incidence.dim(),
            });
        }

        for ((i, j), &predicted) in predicted_incidence.indexed_iter() {
            let truth = true_incidence[[i, j]];
            match (truth != 0, predicted != 0) {
                (true, true) => true_positive[j] += 1,
                (false, true) => false_positive[j] += 1,
                (true, false) => false_negative[j] += 1,
                (false, false) => {}
            }
        }
        Ok(())
    }

    fn compute(&self) -> Array1<f64> {
        match &self.counts {
            PerClassCounts::Empty => Array1::zeros(0),
            PerClassCounts::Accumulating {
                true_positive,
                false_positive,
                false_negative,
            } => Array1::from_iter((0..true_positive.len()).map(|j| {
                self.metric
                    .from_counts(true_positive[j], false_positive[j], false_negative[j])
            })),
        }
    }
}

/// Scores probability-matrix batches by applying an incidence decision to
/// both sides before delegating to a confusion score.
///
/// The true side is thresholded too, which matters when ground truth is
/// itself probabilistic (soft labels).
#[derive(Clone, Debug)]
pub struct BatchedIncidenceDecisionScore<S> {
    decision: IncidenceDecision,
    inner: S,
}

impl<S: IncidenceScore> BatchedIncidenceDecisionScore<S> {
    /// Combine an incidence decision with a confusion score.
    pub fn new(decision: IncidenceDecision, inner: S) -> Self {
        Self { decision, inner }
    }
}

impl<S: IncidenceScore> ProbabilitiesScore for BatchedIncidenceDecisionScore<S> {
    fn add_batch(
        &mut self,
        true_probabilities: ArrayView2<'_, f64>,
        predicted_probabilities: ArrayView2<'_, f64>,
    ) -> Result<()> {
        let true_incidence = self.decision.apply(true_probabilities);
        let predicted_incidence = self.decision.apply(predicted_probabilities);
        self.inner
            .add_batch(true_incidence.view(), predicted_incidence.view())
    }

    fn compute(&self) -> f64 {
        self.inner.compute()
    }
}

/// Default candidate thresholds 0.1 through 0.9.
pub fn default_thresholds() -> Vec<f64> {
    (0..9).map(|i| f64::from(i) / 10.0 + 0.1).collect()
}

/// Selects, a posteriori, the decision threshold that maximizes an optimizer
/// metric and reports a possibly different score metric at that threshold.
///
/// Every candidate threshold sees every batch, so `add_batch` costs one
/// thresholding pass per candidate. Ties between optimizer values are
/// resolved towards the lowest threshold.
pub struct BatchedBestThresholdScore<S, O = BatchedConfusionScore> {
    thresholds: Vec<f64>,
    optimizers: Vec<O>,
    scores: Vec<S>,
}

impl<S: IncidenceScore> BatchedBestThresholdScore<S, BatchedConfusionScore> {
    /// Optimize with the default F1 optimizer over the default thresholds.
    pub fn new(score_generator: impl Fn() -> S) -> Self {
        let thresholds = default_thresholds();
        let optimizers = thresholds
            .iter()
            .map(|_| BatchedConfusionScore::new(ConfusionMetric::F1))
            .collect();
        let scores = thresholds.iter().map(|_| score_generator()).collect();
        Self {
            thresholds,
            optimizers,
            scores,
        }
    }
}

impl<S: IncidenceScore, O: IncidenceScore> BatchedBestThresholdScore<S, O> {
    /// Custom optimizer metric and candidate threshold list.
    pub fn with_optimizer(
        score_generator: impl Fn() -> S,
        optimizer_generator: impl Fn() -> O,
        thresholds: Vec<f64>,
    ) -> Result<Self> {
        if thresholds.is_empty() {
            return Err(Error::InvalidParameter(
                "threshold list must not be empty".to_string(),
            ));
        }
        let optimizers = thresholds.iter().map(|_| optimizer_generator()).collect();
        let scores = thresholds.iter().map(|_| score_generator()).collect();
        Ok(Self {
            thresholds,
            optimizers,
            scores,
        })
    }

    /// The candidate thresholds, in construction order.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }
}

impl<S: IncidenceScore, O: IncidenceScore> ProbabilitiesScore for BatchedBestThresholdScore<S, O> {
    fn add_batch(
        &mut self,
        true_probabilities: ArrayView2<'_, f64>,
        predicted_probabilities: ArrayView2<'_, f64>,
    ) -> Result<()> {
        for (index, &threshold) in self.thresholds.iter().enumerate() {
            let decision = IncidenceDecision::Threshold(threshold);
            let true_incidence = decision.apply(true_probabilities);
            let predicted_incidence = decision.apply(predicted_probabilities);
            self.optimizers[index].add_batch(true_incidence.view(), predicted_incidence.view())?;
            self.scores[index].add_batch(true_incidence.view(), predicted_incidence.view())?;
        }
        Ok(())
    }

    fn compute(&self) -> f64 {
        let mut best_index = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (index, optimizer) in self.optimizers.iter().enumerate() {
            let value = optimizer.compute();
            if value > best_value {
                best_index = index;
                best_value = value;
            }
        }
        debug!(
            "return score for best threshold={}",
            self.thresholds[best_index]
        );
        self.scores[best_index].compute()
    }
}

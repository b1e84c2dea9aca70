//! Batched score traits and score function types.
//!
//! Batched scores accumulate confusion statistics over a stream of matrix
//! batches without materializing the full matrices in memory. Feeding the
//! same data in one batch or many must yield the same result.

use ndarray::{Array1, ArrayView2};

use crate::error::Result;

/// Streaming score over pairs of incidence-matrix batches.
///
/// Batches are accumulated additively and never rolled back. Concurrent
/// `add_batch` calls on the same score are unsupported; callers must
/// serialize them.
pub trait IncidenceScore {
    /// Accumulate one pair of equally shaped incidence matrices.
    fn add_batch(
        &mut self,
        true_incidence: ArrayView2<'_, u8>,
        predicted_incidence: ArrayView2<'_, u8>,
    ) -> Result<()>;

    /// Score derived from all batches seen so far.
    fn compute(&self) -> f64;
}

/// Streaming score computing one value per subject column.
pub trait PerClassIncidenceScore {
    /// Accumulate one pair of equally shaped incidence matrices.
    fn add_batch(
        &mut self,
        true_incidence: ArrayView2<'_, u8>,
        predicted_incidence: ArrayView2<'_, u8>,
    ) -> Result<()>;

    /// Per-subject scores derived from all batches seen so far.
    fn compute(&self) -> Array1<f64>;
}

/// Streaming score over pairs of probability-matrix batches.
pub trait ProbabilitiesScore {
    /// Accumulate one pair of equally shaped probability matrices.
    fn add_batch(
        &mut self,
        true_probabilities: ArrayView2<'_, f64>,
        predicted_probabilities: ArrayView2<'_, f64>,
    ) -> Result<()>;

    /// Score derived from all batches seen so far.
    fn compute(&self) -> f64;
}

/// Score function over a full (test incidence, predicted probabilities) pair.
pub type OverallScoreFn = Box<dyn Fn(ArrayView2<'_, u8>, ArrayView2<'_, f64>) -> Result<f64>>;

/// Score function over a single subject column pair (one vs. rest).
pub type PerClassScoreFn = Box<dyn Fn(ArrayView2<'_, u8>, ArrayView2<'_, f64>) -> Result<f64>>;

//! Evaluation of multi-label classification models.
//!
//! ## Architecture
//!
//! - `incidence`: incidence matrices and probability-to-incidence decisions
//! - `score`: batched confusion scores and pipeline score functions
//! - `condition`: fail-fast dataset sanity checks
//! - `split`: cross-validation dataset splitting
//! - `pipeline`: the `score_models_for_dataset` entry point
//!
//! ## Example
//!
//! ```
//! use clasificar::eval::{BatchedConfusionScore, ConfusionMetric};
//! use clasificar::common::IncidenceScore;
//! use ndarray::array;
//!
//! let truth = array![[1, 0], [0, 1]];
//! let predicted = array![[1, 0], [1, 1]];
//!
//! let mut score = BatchedConfusionScore::new(ConfusionMetric::Recall);
//! score.add_batch(truth.view(), predicted.view()).unwrap();
//! assert_eq!(score.compute(), 1.0);
//! ```

pub mod condition;
pub mod incidence;
pub mod pipeline;
pub mod score;
pub mod split;

pub use condition::{
    check_dataset_subject_distribution, check_dataset_subjects_have_minimum_samples,
};
pub use incidence::{
    subject_incidence_matrix_from_targets, unique_subject_order, IncidenceDecision,
};
pub use pipeline::{fit_model_and_predict, score_models_for_dataset, EvaluationOptions};
pub use score::{
    best_threshold_score_fn, default_thresholds, probabilities_score_fn, threshold_score_fn,
    top_k_score_fn, BatchedBestThresholdScore, BatchedConfusionScore,
    BatchedIncidenceDecisionScore, BatchedPerClassConfusionScore, ConfusionMetric,
};
pub use split::{DatasetSplitFunction, KFoldSplitter};

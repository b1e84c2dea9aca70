//! Multi-label subject classification evaluation toolkit.
//!
//! Assigns library-style subject codes to documents and evaluates how well
//! models do so. The core is a batched scoring and cross-validation
//! pipeline: confusion statistics are accumulated incrementally over
//! streamed prediction batches, per class and in aggregate, with an
//! optional search over decision thresholds for the best operating point.
//!
//! ## Architecture
//!
//! - [`common`]: documents, datasets, model and score traits
//! - [`eval`]: incidence decisions, batched scores, splitting, the
//!   cross-validation pipeline
//! - [`models`]: dummy baselines and a TF-IDF nearest-neighbour classifier
//! - [`vectorize`]: text vectorizers
//!
//! ## Example
//!
//! ```
//! use clasificar::common::{Dataset, Document, Model};
//! use clasificar::eval::{
//!     score_models_for_dataset, threshold_score_fn, unique_subject_order, ConfusionMetric,
//!     EvaluationOptions, KFoldSplitter,
//! };
//! use clasificar::models::OracleModel;
//!
//! let documents = (0..10)
//!     .map(|i| Document::new(format!("doc://{i}"), format!("document {i}")))
//!     .collect();
//! let subjects = (0..10)
//!     .map(|i| vec![format!("subject {}", i % 2)])
//!     .collect();
//! let dataset = Dataset::new(documents, subjects).unwrap();
//! let subject_order = unique_subject_order(&dataset.subjects);
//!
//! let options = EvaluationOptions { n_splits: 2, ..EvaluationOptions::default() };
//! let mut models: Vec<Box<dyn Model>> = vec![Box::new(OracleModel::new())];
//! let split_function = KFoldSplitter::new(2).without_shuffle().into_split_function();
//! let scores = vec![threshold_score_fn(ConfusionMetric::F1, 0.5)];
//!
//! let (overall, _per_class) = score_models_for_dataset(
//!     &options,
//!     &dataset,
//!     &subject_order,
//!     &mut models,
//!     &split_function,
//!     &scores,
//!     &[],
//! )
//! .unwrap();
//! assert_eq!(overall[[0, 0, 0]], 1.0);
//! ```

pub mod common;
pub mod error;
pub mod eval;
pub mod models;
pub mod vectorize;

pub use error::{Error, Result};

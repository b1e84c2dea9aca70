//! Classification model traits.

use ndarray::{Array2, ArrayView2};

use crate::common::document::Document;
use crate::error::Result;

/// Capability for baseline models that receive ground truth at prediction
/// time, used as an upper-bound reference during evaluation.
pub trait Oracle {
    /// Provide the test incidence matrix that a later `predict_proba` call
    /// is expected to reproduce.
    fn set_test_targets(&mut self, test_incidence: ArrayView2<'_, u8>);
}

/// A multi-label classification model.
///
/// `fit` and `predict_proba` block until complete; training a model may run
/// for a long wall-clock duration. Callers must serialize access, the trait
/// makes no concurrency guarantees.
pub trait Model {
    /// Human-readable model name used in log output.
    fn name(&self) -> String;

    /// Fit the model on training documents and their incidence matrix.
    ///
    /// Validation data is optional and only used by models that track
    /// validation scores during fitting.
    fn fit(
        &mut self,
        train_documents: &[Document],
        train_incidence: ArrayView2<'_, u8>,
        validation: Option<(&[Document], ArrayView2<'_, u8>)>,
    ) -> Result<()>;

    /// Predict a subject probability matrix for the given documents.
    ///
    /// The returned matrix has one row per document and one column per
    /// subject of the incidence matrix the model was fitted with.
    fn predict_proba(&self, documents: &[Document]) -> Result<Array2<f64>>;

    /// Oracle capability of this model, `None` for ordinary models.
    fn as_oracle(&mut self) -> Option<&mut dyn Oracle> {
        None
    }
}

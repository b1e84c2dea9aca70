//! Cross-validation evaluation pipeline for multiple models.

use log::info;
use ndarray::{s, Array2, Array3, Array4, ArrayView2};

use crate::common::dataset::Dataset;
use crate::common::document::Document;
use crate::common::model::Model;
use crate::common::score::{OverallScoreFn, PerClassScoreFn};
use crate::error::Result;
use crate::eval::condition::{
    check_dataset_subject_distribution, check_dataset_subjects_have_minimum_samples,
};
use crate::eval::incidence::subject_incidence_matrix_from_targets;
use crate::eval::split::DatasetSplitFunction;

/// Injected pipeline configuration.
#[derive(Clone, Debug)]
pub struct EvaluationOptions {
    /// Number of cross-validation splits.
    pub n_splits: usize,
    /// Stop after evaluating exactly this many splits, leaving later scores
    /// NaN; `Some(0)` evaluates no split at all.
    pub stop_after_evaluating_split: Option<usize>,
    /// Provide the test set as validation data to `Model::fit`, for models
    /// that track validation scores over training epochs.
    pub use_test_data_as_validation_data: bool,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            n_splits: 10,
            stop_after_evaluating_split: None,
            use_test_data_as_validation_data: false,
        }
    }
}

/// Fit a model and predict probabilities for the test documents.
pub fn fit_model_and_predict(
    model: &mut dyn Model,
    train_documents: &[Document],
    train_incidence: ArrayView2<'_, u8>,
    test_documents: &[Document],
    validation: Option<(&[Document], ArrayView2<'_, u8>)>,
) -> Result<Array2<f64>> {
    info!("do training");
    model.fit(train_documents, train_incidence, validation)?;

    info!("do prediction");
    model.predict_proba(test_documents)
}

/// Evaluate a dataset using cross-validation for a number of models and
/// score functions.
///
/// Returns the overall score matrix of shape
/// `(models, overall_score_functions, n_splits)` and the per-class score
/// matrix of shape `(models, per_class_score_functions, n_splits, subjects)`.
/// Cells of splits that were never evaluated (early stop) stay NaN; callers
/// must treat NaN as "not computed", not as a score of zero.
#[allow(clippy::too_many_arguments)]
pub fn score_models_for_dataset(
    options: &EvaluationOptions,
    dataset: &Dataset,
    subject_order: &[String],
    models: &mut [Box<dyn Model>],
    split_function: &DatasetSplitFunction,
    overall_score_functions: &[OverallScoreFn],
    per_class_score_functions: &[PerClassScoreFn],
) -> Result<(Array3<f64>, Array4<f64>)> {
    check_dataset_subjects_have_minimum_samples(dataset, options.n_splits)?;

    let n_splits = options.n_splits;
    let mut overall_score_matrix = Array3::from_elem(
        (models.len(), overall_score_functions.len(), n_splits),
        f64::NAN,
    );
    let mut per_class_score_matrix = Array4::from_elem(
        (
            models.len(),
            per_class_score_functions.len(),
            n_splits,
            subject_order.len(),
        ),
        f64::NAN,
    );

    let distribution_band = (0.5 / n_splits as f64, 2.0 / n_splits as f64);

    for (i, (train_dataset, test_dataset)) in
        split_function(dataset).into_iter().take(n_splits).enumerate()
    {
        if options.stop_after_evaluating_split.is_some_and(|stop| i >= stop) {
            info!("stop evaluation early after {i} splits");
            break;
        }

        info!("prepare {}-th cross validation split", i + 1);
        check_dataset_subject_distribution(&train_dataset, &test_dataset, distribution_band)?;

        let train_incidence_matrix =
            subject_incidence_matrix_from_targets(&train_dataset.subjects, subject_order);
        let test_incidence_matrix =
            subject_incidence_matrix_from_targets(&test_dataset.subjects, subject_order);

        info!(
            "evaluate {}-th cross validation split with {} training and {} test samples",
            i + 1,
            train_dataset.len(),
            test_dataset.len()
        );

        for (j, model) in models.iter_mut().enumerate() {
            info!("evaluate model {} for {}-th split", model.name(), i + 1);

            if let Some(oracle) = model.as_oracle() {
                oracle.set_test_targets(test_incidence_matrix.view());
            }

            let validation = options
                .use_test_data_as_validation_data
                .then(|| (test_dataset.documents.as_slice(), test_incidence_matrix.view()));

            let predicted_probabilities = fit_model_and_predict(
                model.as_mut(),
                &train_dataset.documents,
                train_incidence_matrix.view(),
                &test_dataset.documents,
                validation,
            )?;

            info!("do global scoring");
            for (k, score_function) in overall_score_functions.iter().enumerate() {
                overall_score_matrix[[j, k, i]] = score_function(
                    test_incidence_matrix.view(),
                    predicted_probabilities.view(),
                )?;
            }

            info!("do per-subject scoring");
            for s_i in 0..subject_order.len() {
                let true_column = test_incidence_matrix.slice(s![.., s_i..s_i + 1]);
                let predicted_column = predicted_probabilities.slice(s![.., s_i..s_i + 1]);

                for (k, score_function) in per_class_score_functions.iter().enumerate() {
                    per_class_score_matrix[[j, k, i, s_i]] =
                        score_function(true_column, predicted_column)?;
                }
            }
        }
    }

    Ok((overall_score_matrix, per_class_score_matrix))
}

//! Property tests for batched confusion scores.
//!
//! Ensures the scoring core satisfies its mathematical invariants:
//! - scores bounded to [0, 1], never NaN or infinite
//! - batch accumulation is additive
//! - per-class scores agree with aggregate scores per column
//! - top-k decisions mark exactly min(k, positive entries) per row

use clasificar::common::{IncidenceScore, PerClassIncidenceScore};
use clasificar::eval::{
    threshold_score_fn, BatchedConfusionScore, BatchedPerClassConfusionScore, ConfusionMetric,
    IncidenceDecision,
};
use ndarray::{s, Array2};
use proptest::collection::vec;
use proptest::prelude::*;

const METRICS: [ConfusionMetric; 3] = [
    ConfusionMetric::Precision,
    ConfusionMetric::Recall,
    ConfusionMetric::F1,
];

/// Generate a pair of equally shaped incidence matrices.
fn incidence_pair() -> impl Strategy<Value = (Array2<u8>, Array2<u8>)> {
    (1usize..16, 1usize..8).prop_flat_map(|(rows, cols)| {
        (
            vec(0u8..2, rows * cols),
            vec(0u8..2, rows * cols),
            Just((rows, cols)),
        )
            .prop_map(|(truth, predicted, shape)| {
                (
                    Array2::from_shape_vec(shape, truth).expect("shape matches data"),
                    Array2::from_shape_vec(shape, predicted).expect("shape matches data"),
                )
            })
    })
}

/// Generate a probability matrix with values in [0, 1].
fn probability_matrix() -> impl Strategy<Value = Array2<f64>> {
    (1usize..16, 1usize..8).prop_flat_map(|(rows, cols)| {
        vec(0.0f64..=1.0, rows * cols).prop_map(move |values| {
            Array2::from_shape_vec((rows, cols), values).expect("shape matches data")
        })
    })
}

proptest! {
    #[test]
    fn prop_aggregate_scores_bounded((truth, predicted) in incidence_pair()) {
        for metric in METRICS {
            let mut score = BatchedConfusionScore::new(metric);
            score.add_batch(truth.view(), predicted.view()).unwrap();
            let value = score.compute();
            prop_assert!((0.0..=1.0).contains(&value), "{metric:?} = {value} out of bounds");
            prop_assert!(!value.is_nan() && !value.is_infinite());
        }
    }

    #[test]
    fn prop_batch_accumulation_is_additive(
        (truth, predicted) in incidence_pair(),
        split_at in 0usize..16,
    ) {
        let split_at = split_at.min(truth.nrows());
        for metric in METRICS {
            let mut single = BatchedConfusionScore::new(metric);
            single.add_batch(truth.view(), predicted.view()).unwrap();

            let mut batched = BatchedConfusionScore::new(metric);
            batched
                .add_batch(truth.slice(s![..split_at, ..]), predicted.slice(s![..split_at, ..]))
                .unwrap();
            batched
                .add_batch(truth.slice(s![split_at.., ..]), predicted.slice(s![split_at.., ..]))
                .unwrap();

            prop_assert_eq!(single.counts(), batched.counts());
        }
    }

    #[test]
    fn prop_per_class_vector_has_one_entry_per_subject((truth, predicted) in incidence_pair()) {
        let mut score = BatchedPerClassConfusionScore::new(ConfusionMetric::F1);
        score.add_batch(truth.view(), predicted.view()).unwrap();
        prop_assert_eq!(score.compute().len(), truth.ncols());
    }

    #[test]
    fn prop_per_class_matches_aggregate_per_column((truth, predicted) in incidence_pair()) {
        for metric in METRICS {
            let mut per_class = BatchedPerClassConfusionScore::new(metric);
            per_class.add_batch(truth.view(), predicted.view()).unwrap();
            let vector = per_class.compute();

            for j in 0..truth.ncols() {
                let mut aggregate = BatchedConfusionScore::new(metric);
                aggregate
                    .add_batch(
                        truth.slice(s![.., j..j + 1]),
                        predicted.slice(s![.., j..j + 1]),
                    )
                    .unwrap();
                prop_assert!((vector[j] - aggregate.compute()).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn prop_top_k_marks_min_of_k_and_positive_entries(
        probabilities in probability_matrix(),
        k in 1usize..6,
    ) {
        let incidence = IncidenceDecision::TopK(k).apply(probabilities.view());
        for (row, probability_row) in incidence.rows().into_iter().zip(probabilities.rows()) {
            let marked = row.iter().filter(|&&value| value == 1).count();
            let positive = probability_row.iter().filter(|&&p| p > 0.0).count();
            prop_assert_eq!(marked, k.min(positive));
        }
    }

    #[test]
    fn prop_threshold_score_fn_bounded(
        probabilities in probability_matrix(),
        threshold in 0.05f64..0.95,
    ) {
        let truth = probabilities.mapv(|p| u8::from(p > 0.5));
        for metric in METRICS {
            let score_fn = threshold_score_fn(metric, threshold);
            let value = score_fn(truth.view(), probabilities.view()).unwrap();
            prop_assert!((0.0..=1.0).contains(&value));
            prop_assert!(!value.is_nan());
        }
    }
}

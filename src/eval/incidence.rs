//! Incidence matrices and incidence decision policies.

use std::collections::HashMap;

use log::warn;
use ndarray::{Array2, ArrayView2};

/// Policy converting a probability matrix into a binary incidence matrix.
///
/// Decisions are pure: the input is never mutated and the same input always
/// produces the same output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IncidenceDecision {
    /// Mark entries strictly greater than the threshold.
    Threshold(f64),
    /// Mark the k highest-probability entries of each row. Ties are broken
    /// by lowest column index and zero-probability entries are never marked.
    TopK(usize),
}

impl IncidenceDecision {
    /// Apply the decision to a probability matrix.
    pub fn apply(&self, probabilities: ArrayView2<'_, f64>) -> Array2<u8> {
        match *self {
            IncidenceDecision::Threshold(threshold) => {
                probabilities.mapv(|p| u8::from(p > threshold))
            }
            IncidenceDecision::TopK(k) => top_k_incidence(probabilities, k),
        }
    }
}

fn top_k_incidence(probabilities: ArrayView2<'_, f64>, k: usize) -> Array2<u8> {
    let mut incidence = Array2::zeros(probabilities.dim());
    for (i, row) in probabilities.rows().into_iter().enumerate() {
        let mut ranked: Vec<(usize, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, p)| p > 0.0)
            .collect();
        // stable sort keeps ties ordered by column index
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        for &(j, _) in ranked.iter().take(k) {
            incidence[[i, j]] = 1;
        }
    }
    incidence
}

/// Stable, deduplicated subject order from per-document target lists.
///
/// The order is lexicographic, so it is identical for every permutation of
/// the same dataset.
pub fn unique_subject_order(targets: &[Vec<String>]) -> Vec<String> {
    let mut order: Vec<String> = targets.iter().flatten().cloned().collect();
    order.sort();
    order.dedup();
    order
}

/// Incidence matrix (documents x subjects) for targets against a subject order.
///
/// Subjects missing from the order are ignored with a warning.
pub fn subject_incidence_matrix_from_targets(
    targets: &[Vec<String>],
    subject_order: &[String],
) -> Array2<u8> {
    let column_by_subject: HashMap<&str, usize> = subject_order
        .iter()
        .enumerate()
        .map(|(j, subject)| (subject.as_str(), j))
        .collect();

    let mut incidence = Array2::zeros((targets.len(), subject_order.len()));
    for (i, subjects) in targets.iter().enumerate() {
        for subject in subjects {
            match column_by_subject.get(subject.as_str()) {
                Some(&j) => incidence[[i, j]] = 1,
                None => warn!("subject {subject} is not part of the subject order, ignoring"),
            }
        }
    }
    incidence
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_threshold_decision_is_strictly_greater() {
        let probabilities = array![[0.5, 0.51], [0.49, 1.0]];
        let incidence = IncidenceDecision::Threshold(0.5).apply(probabilities.view());
        assert_eq!(incidence, array![[0, 1], [0, 1]]);
    }

    #[test]
    fn test_top_k_marks_k_highest_entries() {
        let probabilities = array![[0.1, 0.9, 0.5], [0.3, 0.2, 0.8]];
        let incidence = IncidenceDecision::TopK(2).apply(probabilities.view());
        assert_eq!(incidence, array![[0, 1, 1], [1, 0, 1]]);
    }

    #[test]
    fn test_top_k_breaks_ties_by_column_index() {
        let probabilities = array![[0.5, 0.5, 0.5]];
        let incidence = IncidenceDecision::TopK(2).apply(probabilities.view());
        assert_eq!(incidence, array![[1, 1, 0]]);
    }

    #[test]
    fn test_top_k_skips_zero_probability_entries() {
        let probabilities = array![[0.0, 0.4, 0.0]];
        let incidence = IncidenceDecision::TopK(3).apply(probabilities.view());
        assert_eq!(incidence, array![[0, 1, 0]]);
    }

    #[test]
    fn test_unique_subject_order_is_sorted_and_unique() {
        let targets = vec![
            vec!["s3".to_string(), "s1".to_string()],
            vec!["s1".to_string()],
            vec!["s2".to_string()],
        ];
        assert_eq!(unique_subject_order(&targets), vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn test_subject_incidence_matrix_from_targets() {
        let targets = vec![
            vec!["s1".to_string(), "s3".to_string()],
            vec!["s2".to_string()],
            vec![],
        ];
        let subject_order = vec!["s1".to_string(), "s2".to_string(), "s3".to_string()];
        let incidence = subject_incidence_matrix_from_targets(&targets, &subject_order);
        assert_eq!(incidence, array![[1, 0, 1], [0, 1, 0], [0, 0, 0]]);
    }

    #[test]
    fn test_subject_incidence_matrix_ignores_unknown_subjects() {
        let targets = vec![vec!["s1".to_string(), "unknown".to_string()]];
        let subject_order = vec!["s1".to_string()];
        let incidence = subject_incidence_matrix_from_targets(&targets, &subject_order);
        assert_eq!(incidence, array![[1]]);
    }
}

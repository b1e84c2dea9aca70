//! Sanity checks preceding and during cross-validation.

use std::collections::BTreeMap;

use crate::common::dataset::Dataset;
use crate::error::{Error, Result};

fn subject_counts(dataset: &Dataset) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for subjects in &dataset.subjects {
        for subject in subjects {
            *counts.entry(subject.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

/// Verify every subject of the dataset has at least `minimum` samples.
///
/// Subjects with fewer samples cannot be distributed over that many
/// cross-validation splits; the check fails fast before any model is fit.
pub fn check_dataset_subjects_have_minimum_samples(
    dataset: &Dataset,
    minimum: usize,
) -> Result<()> {
    for (subject, count) in subject_counts(dataset) {
        if count < minimum {
            return Err(Error::InsufficientSamples {
                subject: subject.to_string(),
                count,
                required: minimum,
            });
        }
    }
    Ok(())
}

/// Verify each subject's share of test samples stays inside the open band
/// `(low, high)`.
///
/// A violation indicates a bad split function or bad data rather than a
/// transient condition, so it aborts the run.
pub fn check_dataset_subject_distribution(
    train_dataset: &Dataset,
    test_dataset: &Dataset,
    band: (f64, f64),
) -> Result<()> {
    let (low, high) = band;
    let train_counts = subject_counts(train_dataset);
    let test_counts = subject_counts(test_dataset);

    let mut subjects: Vec<&str> = train_counts.keys().chain(test_counts.keys()).copied().collect();
    subjects.sort_unstable();
    subjects.dedup();

    for subject in subjects {
        let train_count = train_counts.get(subject).copied().unwrap_or(0);
        let test_count = test_counts.get(subject).copied().unwrap_or(0);
        let ratio = test_count as f64 / (train_count + test_count) as f64;
        if ratio <= low || ratio >= high {
            return Err(Error::DistributionSkew {
                subject: subject.to_string(),
                ratio,
                low,
                high,
            });
        }
    }
    Ok(())
}

//! Dataset splitting for cross-validation.

use crate::common::dataset::Dataset;

/// Produces `n_splits` (train, test) partitions of a dataset.
///
/// Split functions are expected to be deterministic for a fixed seed.
pub type DatasetSplitFunction = Box<dyn Fn(&Dataset) -> Vec<(Dataset, Dataset)>>;

/// Seeded k-fold splitter over document indices.
///
/// Every document lands in exactly one test fold; train folds are the
/// complement. Shuffling uses a fixed linear congruential generator so the
/// same seed always produces the same partition.
#[derive(Clone, Debug)]
pub struct KFoldSplitter {
    n_splits: usize,
    shuffle: bool,
    seed: u64,
}

impl KFoldSplitter {
    /// Create a shuffling splitter with the given number of folds.
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: true,
            seed: 42,
        }
    }

    /// Set the random seed used for shuffling.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Disable shuffling; folds are consecutive index ranges.
    #[must_use]
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Generate (train, test) index lists for each fold.
    pub fn split_indices(&self, n_samples: usize) -> Vec<(Vec<usize>, Vec<usize>)> {
        let mut indices: Vec<usize> = (0..n_samples).collect();

        if self.shuffle {
            let mut rng_state = self.seed;
            for i in (1..n_samples).rev() {
                rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
                let j = (rng_state >> 33) as usize % (i + 1);
                indices.swap(i, j);
            }
        }

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;

        for i in 0..self.n_splits {
            let extra = usize::from(i < remainder);
            let end = start + fold_size + extra;

            let test_indices: Vec<usize> = indices[start..end].to_vec();
            let train_indices: Vec<usize> = indices[..start]
                .iter()
                .chain(indices[end..].iter())
                .copied()
                .collect();

            folds.push((train_indices, test_indices));
            start = end;
        }

        folds
    }

    /// Split a dataset into (train, test) pairs, one per fold.
    pub fn split(&self, dataset: &Dataset) -> Vec<(Dataset, Dataset)> {
        self.split_indices(dataset.len())
            .into_iter()
            .map(|(train_indices, test_indices)| {
                (dataset.select(&train_indices), dataset.select(&test_indices))
            })
            .collect()
    }

    /// Wrap the splitter as a `DatasetSplitFunction` for the pipeline.
    pub fn into_split_function(self) -> DatasetSplitFunction {
        Box::new(move |dataset| self.split(dataset))
    }
}

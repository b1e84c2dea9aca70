//! Dummy baseline models.
//!
//! These models carry no signal of their own. They anchor evaluation
//! results: the oracle marks the achievable upper bound, the nihilistic and
//! random models mark the floor.

use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::document::Document;
use crate::common::model::{Model, Oracle};
use crate::error::{Error, Result};

/// Upper-bound baseline that is handed the test targets before predicting.
#[derive(Clone, Debug, Default)]
pub struct OracleModel {
    test_incidence: Option<Array2<u8>>,
}

impl OracleModel {
    /// Create an oracle model without targets.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Oracle for OracleModel {
    fn set_test_targets(&mut self, test_incidence: ArrayView2<'_, u8>) {
        self.test_incidence = Some(test_incidence.to_owned());
    }
}

impl Model for OracleModel {
    fn name(&self) -> String {
        "oracle".to_string()
    }

    fn fit(
        &mut self,
        _train_documents: &[Document],
        _train_incidence: ArrayView2<'_, u8>,
        _validation: Option<(&[Document], ArrayView2<'_, u8>)>,
    ) -> Result<()> {
        // nothing to learn, predictions come from the injected targets
        Ok(())
    }

    fn predict_proba(&self, _documents: &[Document]) -> Result<Array2<f64>> {
        self.test_incidence
            .as_ref()
            .map(|incidence| incidence.mapv(f64::from))
            .ok_or_else(|| Error::NotFitted("oracle model was not given test targets".to_string()))
    }

    fn as_oracle(&mut self) -> Option<&mut dyn Oracle> {
        Some(self)
    }
}

/// Pessimistic baseline predicting zero probability for every subject.
#[derive(Clone, Debug, Default)]
pub struct NihilisticModel {
    n_subjects: Option<usize>,
}

impl NihilisticModel {
    /// Create a nihilistic model.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Model for NihilisticModel {
    fn name(&self) -> String {
        "nihilistic".to_string()
    }

    fn fit(
        &mut self,
        _train_documents: &[Document],
        train_incidence: ArrayView2<'_, u8>,
        _validation: Option<(&[Document], ArrayView2<'_, u8>)>,
    ) -> Result<()> {
        self.n_subjects = Some(train_incidence.ncols());
        Ok(())
    }

    fn predict_proba(&self, documents: &[Document]) -> Result<Array2<f64>> {
        let n_subjects = self
            .n_subjects
            .ok_or_else(|| Error::NotFitted("nihilistic model".to_string()))?;
        Ok(Array2::zeros((documents.len(), n_subjects)))
    }
}

/// Baseline predicting seeded uniform random probabilities.
#[derive(Clone, Debug)]
pub struct RandomModel {
    seed: u64,
    n_subjects: Option<usize>,
}

impl RandomModel {
    /// Create a random model with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            n_subjects: None,
        }
    }
}

impl Model for RandomModel {
    fn name(&self) -> String {
        "random".to_string()
    }

    fn fit(
        &mut self,
        _train_documents: &[Document],
        train_incidence: ArrayView2<'_, u8>,
        _validation: Option<(&[Document], ArrayView2<'_, u8>)>,
    ) -> Result<()> {
        self.n_subjects = Some(train_incidence.ncols());
        Ok(())
    }

    fn predict_proba(&self, documents: &[Document]) -> Result<Array2<f64>> {
        let n_subjects = self
            .n_subjects
            .ok_or_else(|| Error::NotFitted("random model".to_string()))?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok(Array2::from_shape_fn((documents.len(), n_subjects), |_| {
            rng.gen::<f64>()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn documents(n: usize) -> Vec<Document> {
        (0..n)
            .map(|i| Document::new(format!("doc://{i}"), format!("doc {i}")))
            .collect()
    }

    #[test]
    fn test_oracle_model_returns_injected_targets() {
        let mut model = OracleModel::new();
        let targets = array![[1, 0], [0, 1]];
        model
            .as_oracle()
            .expect("oracle capability")
            .set_test_targets(targets.view());

        let predicted = model.predict_proba(&documents(2)).unwrap();
        assert_eq!(predicted, array![[1.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_oracle_model_without_targets_is_not_fitted() {
        let model = OracleModel::new();
        let result = model.predict_proba(&documents(1));
        assert!(matches!(result, Err(Error::NotFitted(_))));
    }

    #[test]
    fn test_nihilistic_model_predicts_zeros() {
        let mut model = NihilisticModel::new();
        let incidence = array![[1, 0, 1], [0, 1, 0]];
        model.fit(&documents(2), incidence.view(), None).unwrap();

        let predicted = model.predict_proba(&documents(3)).unwrap();
        assert_eq!(predicted.dim(), (3, 3));
        assert!(predicted.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_random_model_is_deterministic_and_bounded() {
        let mut model = RandomModel::new(123);
        let incidence = array![[1, 0], [0, 1]];
        model.fit(&documents(2), incidence.view(), None).unwrap();

        let first = model.predict_proba(&documents(4)).unwrap();
        let second = model.predict_proba(&documents(4)).unwrap();
        assert_eq!(first, second);
        assert!(first.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_ordinary_models_expose_no_oracle_capability() {
        let mut model = NihilisticModel::new();
        assert!(model.as_oracle().is_none());
    }
}

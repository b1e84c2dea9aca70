//! k-nearest-neighbour classification over TF-IDF features.

use log::debug;
use ndarray::{Array2, ArrayView2};

use crate::common::document::Document;
use crate::common::model::Model;
use crate::error::{Error, Result};
use crate::vectorize::{TfidfVectorizer, Vectorizer};

#[derive(Clone, Debug)]
struct FittedKnn {
    train_vectors: Array2<f64>,
    train_incidence: Array2<f64>,
}

/// Nearest-neighbour model over TF-IDF document vectors.
///
/// Predicted probabilities are the column-wise mean of the incidence rows of
/// the k most similar training documents (cosine similarity, ties broken by
/// training order). With k=1 the model reproduces the training incidence
/// when asked to predict training documents.
#[derive(Clone, Debug)]
pub struct TfidfKnnModel {
    k: usize,
    vectorizer: TfidfVectorizer,
    fitted: Option<FittedKnn>,
}

impl TfidfKnnModel {
    /// Create an unfitted model with `k` neighbours and a TF-IDF vocabulary
    /// capped at `max_features`.
    pub fn new(k: usize, max_features: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidParameter(
                "number of neighbours must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            k,
            vectorizer: TfidfVectorizer::new(max_features),
            fitted: None,
        })
    }
}

impl Model for TfidfKnnModel {
    fn name(&self) -> String {
        format!("tfidf knn k={}", self.k)
    }

    fn fit(
        &mut self,
        train_documents: &[Document],
        train_incidence: ArrayView2<'_, u8>,
        _validation: Option<(&[Document], ArrayView2<'_, u8>)>,
    ) -> Result<()> {
        let texts: Vec<String> = train_documents.iter().map(Document::text).collect();
        self.vectorizer.fit(&texts)?;
        let train_vectors = self.vectorizer.transform(&texts)?;
        debug!(
            "fitted tfidf knn on {} documents with {} features",
            train_vectors.nrows(),
            train_vectors.ncols()
        );
        self.fitted = Some(FittedKnn {
            train_vectors,
            train_incidence: train_incidence.mapv(f64::from),
        });
        Ok(())
    }

    fn predict_proba(&self, documents: &[Document]) -> Result<Array2<f64>> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| Error::NotFitted("tfidf knn model".to_string()))?;

        let texts: Vec<String> = documents.iter().map(Document::text).collect();
        let vectors = self.vectorizer.transform(&texts)?;

        let n_subjects = fitted.train_incidence.ncols();
        let neighbours = self.k.min(fitted.train_vectors.nrows());
        let mut probabilities = Array2::zeros((documents.len(), n_subjects));

        for (i, vector) in vectors.rows().into_iter().enumerate() {
            // rows are l2-normalized, so the dot product is cosine similarity
            let similarities = fitted.train_vectors.dot(&vector);
            let mut ranked: Vec<(usize, f64)> =
                similarities.iter().copied().enumerate().collect();
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

            for &(train_index, _) in ranked.iter().take(neighbours) {
                for j in 0..n_subjects {
                    probabilities[[i, j]] +=
                        fitted.train_incidence[[train_index, j]] / neighbours as f64;
                }
            }
        }
        Ok(probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn train_documents() -> Vec<Document> {
        vec![
            Document::new("doc://0", "linear algebra and matrices"),
            Document::new("doc://1", "organic chemistry of proteins"),
            Document::new("doc://2", "medieval european history"),
        ]
    }

    #[test]
    fn test_nearest_neighbour_overfits_training_data() {
        let documents = train_documents();
        let incidence = array![[1, 0], [0, 1], [1, 1]];

        let mut model = TfidfKnnModel::new(1, 1000).unwrap();
        model.fit(&documents, incidence.view(), None).unwrap();

        let predicted = model.predict_proba(&documents).unwrap();
        assert_eq!(predicted, incidence.mapv(f64::from));
    }

    #[test]
    fn test_predict_before_fit_is_not_fitted() {
        let model = TfidfKnnModel::new(1, 1000).unwrap();
        assert!(matches!(
            model.predict_proba(&train_documents()),
            Err(Error::NotFitted(_))
        ));
    }

    #[test]
    fn test_probabilities_average_k_neighbours() {
        let documents = train_documents();
        let incidence = array![[1, 0], [0, 1], [1, 1]];

        let mut model = TfidfKnnModel::new(3, 1000).unwrap();
        model.fit(&documents, incidence.view(), None).unwrap();

        let predicted = model.predict_proba(&documents).unwrap();
        // all three neighbours contribute for every query document
        for row in predicted.rows() {
            assert!((row[0] - 2.0 / 3.0).abs() < 1e-12);
            assert!((row[1] - 2.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_neighbours_is_invalid() {
        assert!(matches!(
            TfidfKnnModel::new(0, 1000),
            Err(Error::InvalidParameter(_))
        ));
    }
}

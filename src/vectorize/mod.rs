//! Text vectorizers turning documents into feature matrices.

use std::collections::HashMap;

use log::debug;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

/// A vectorizer model that can be fitted to a corpus.
pub trait Vectorizer {
    /// Optionally train the vectorizer on the provided texts.
    fn fit(&mut self, texts: &[String]) -> Result<()>;

    /// Vector representations of the texts, one row per text.
    fn transform(&self, texts: &[String]) -> Result<Array2<f64>>;
}

/// Lowercase alphanumeric token split. Full linguistic preprocessing
/// (stemming, stopwords) is outside the scope of this crate.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Debug)]
struct TfidfVocabulary {
    column_by_term: HashMap<String, usize>,
    idf: Vec<f64>,
}

/// TF-IDF vectorizer with a document-frequency capped vocabulary.
///
/// Uses smoothed inverse document frequency `ln((1 + n) / (1 + df)) + 1`
/// and L2-normalized rows.
#[derive(Clone, Debug)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: Option<TfidfVocabulary>,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer keeping at most `max_features` terms.
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: None,
        }
    }

    /// Number of terms selected during fit.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary
            .as_ref()
            .map_or(0, |vocabulary| vocabulary.idf.len())
    }
}

impl Vectorizer for TfidfVectorizer {
    fn fit(&mut self, texts: &[String]) -> Result<()> {
        debug!("fit tfidf vectorizer on {} texts", texts.len());

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for text in texts {
            let mut tokens = tokenize(text);
            tokens.sort();
            tokens.dedup();
            for token in tokens {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        // keep the most frequent terms, ties resolved alphabetically
        let mut ranked: Vec<(String, usize)> = document_frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        // alphabetic column order keeps transforms stable across fits
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let n_documents = texts.len() as f64;
        let idf = ranked
            .iter()
            .map(|(_, df)| ((1.0 + n_documents) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();
        let column_by_term = ranked
            .into_iter()
            .enumerate()
            .map(|(column, (term, _))| (term, column))
            .collect();

        self.vocabulary = Some(TfidfVocabulary {
            column_by_term,
            idf,
        });
        debug!("fitted tfidf vectorizer with {} terms", self.vocabulary_size());
        Ok(())
    }

    fn transform(&self, texts: &[String]) -> Result<Array2<f64>> {
        let vocabulary = self
            .vocabulary
            .as_ref()
            .ok_or_else(|| Error::NotFitted("tfidf vectorizer".to_string()))?;

        let mut vectors: Array2<f64> = Array2::zeros((texts.len(), vocabulary.idf.len()));
        for (i, text) in texts.iter().enumerate() {
            for token in tokenize(text) {
                if let Some(&j) = vocabulary.column_by_term.get(&token) {
                    vectors[[i, j]] += vocabulary.idf[j];
                }
            }
            let norm = vectors.row(i).dot(&vectors.row(i)).sqrt();
            if norm > 0.0 {
                vectors.row_mut(i).mapv_inplace(|value| value / norm);
            }
        }
        Ok(vectors)
    }
}

/// A vectorizer returning fixed-size seeded random vectors.
#[derive(Clone, Debug)]
pub struct RandomVectorizer {
    size: usize,
    seed: u64,
}

impl RandomVectorizer {
    /// Create a random vectorizer producing vectors of the given size.
    pub fn new(size: usize, seed: u64) -> Self {
        Self { size, seed }
    }
}

impl Vectorizer for RandomVectorizer {
    fn fit(&mut self, _texts: &[String]) -> Result<()> {
        Ok(())
    }

    fn transform(&self, texts: &[String]) -> Result<Array2<f64>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok(Array2::from_shape_fn((texts.len(), self.size), |_| {
            rng.gen::<f64>()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn corpus() -> Vec<String> {
        vec![
            "machine learning for document classification".to_string(),
            "classification of library documents".to_string(),
            "deep learning".to_string(),
        ]
    }

    #[test]
    fn test_tfidf_transform_before_fit_is_not_fitted() {
        let vectorizer = TfidfVectorizer::new(100);
        assert!(matches!(
            vectorizer.transform(&corpus()),
            Err(Error::NotFitted(_))
        ));
    }

    #[test]
    fn test_tfidf_rows_are_l2_normalized() {
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&corpus()).unwrap();
        let vectors = vectorizer.transform(&corpus()).unwrap();
        for row in vectors.rows() {
            let norm = row.dot(&row).sqrt();
            assert_relative_eq!(norm, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tfidf_max_features_caps_vocabulary() {
        let mut vectorizer = TfidfVectorizer::new(2);
        vectorizer.fit(&corpus()).unwrap();
        assert_eq!(vectorizer.vocabulary_size(), 2);
    }

    #[test]
    fn test_tfidf_unknown_terms_map_to_zero_vector() {
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&corpus()).unwrap();
        let vectors = vectorizer
            .transform(&["completely unrelated words".to_string()])
            .unwrap();
        assert!(vectors.iter().all(|&value| value == 0.0));
    }

    #[test]
    fn test_random_vectorizer_shape_and_determinism() {
        let vectorizer = RandomVectorizer::new(3, 9);
        let first = vectorizer.transform(&corpus()).unwrap();
        let second = vectorizer.transform(&corpus()).unwrap();
        assert_eq!(first.dim(), (3, 3));
        assert_eq!(first, second);
    }
}

//! Dataset of documents and their subject annotations.

use serde::{Deserialize, Serialize};

use crate::common::document::Document;
use crate::error::{Error, Result};

/// A sequence of documents together with their subject annotations.
///
/// Documents and subject target lists are parallel: `subjects[i]` holds the
/// subject identifiers of `documents[i]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dataset {
    /// The documents of the dataset.
    pub documents: Vec<Document>,
    /// The subject annotations, one list per document.
    pub subjects: Vec<Vec<String>>,
}

impl Dataset {
    /// Create a dataset, verifying documents and annotations are parallel.
    pub fn new(documents: Vec<Document>, subjects: Vec<Vec<String>>) -> Result<Self> {
        if documents.len() != subjects.len() {
            return Err(Error::InvalidParameter(format!(
                "dataset has {} documents but {} subject lists",
                documents.len(),
                subjects.len()
            )));
        }
        Ok(Self { documents, subjects })
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the dataset contains no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// New dataset containing only the documents at the given indices.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            documents: indices.iter().map(|&i| self.documents[i].clone()).collect(),
            subjects: indices.iter().map(|&i| self.subjects[i].clone()).collect(),
        }
    }
}

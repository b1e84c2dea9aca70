//! Document representation.

use serde::{Deserialize, Serialize};

/// A document that can be annotated with subjects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier of the document.
    pub uri: String,
    /// Title text.
    pub title: String,
    /// Optional full text.
    pub fulltext: Option<String>,
}

impl Document {
    /// Create a document from its uri and title.
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
            fulltext: None,
        }
    }

    /// Attach a full text to the document.
    #[must_use]
    pub fn with_fulltext(mut self, fulltext: impl Into<String>) -> Self {
        self.fulltext = Some(fulltext.into());
        self
    }

    /// Concatenation of all available text fields, used by vectorizers.
    pub fn text(&self) -> String {
        match &self.fulltext {
            Some(fulltext) => format!("{} {}", self.title, fulltext),
            None => self.title.clone(),
        }
    }
}

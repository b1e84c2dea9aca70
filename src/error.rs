//! Crate-wide error types.

use thiserror::Error;

/// Errors raised by the evaluation toolkit.
///
/// All of these signal programmer or data errors and are surfaced
/// immediately; nothing in the toolkit retries.
#[derive(Debug, Error)]
pub enum Error {
    /// Batch matrices disagree in shape with each other or with prior batches.
    ///
    /// When a per-class accumulator rejects a changed column count, the
    /// expected column count is the one established by its first batch while
    /// the expected row count echoes the incoming batch (row counts may vary
    /// freely between batches).
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A subject has fewer samples than the number of cross-validation splits.
    #[error("subject {subject} has only {count} samples, need at least {required}")]
    InsufficientSamples {
        subject: String,
        count: usize,
        required: usize,
    },

    /// The train/test share of a subject fell outside the tolerance band.
    #[error("subject {subject} has test ratio {ratio:.3} outside the expected band ({low:.3}, {high:.3})")]
    DistributionSkew {
        subject: String,
        ratio: f64,
        low: f64,
        high: f64,
    },

    /// Invalid configuration or constructor argument.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A model or vectorizer was used before being fitted.
    #[error("not fitted: {0}")]
    NotFitted(String),
}

/// Result type for all fallible toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

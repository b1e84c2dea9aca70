//! Shared data structures and collaborator traits.

pub mod dataset;
pub mod document;
pub mod model;
pub mod score;

pub use dataset::Dataset;
pub use document::Document;
pub use model::{Model, Oracle};
pub use score::{
    IncidenceScore, OverallScoreFn, PerClassIncidenceScore, PerClassScoreFn, ProbabilitiesScore,
};

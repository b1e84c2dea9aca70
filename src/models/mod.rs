//! Classification models.

pub mod dummy;
pub mod knn;

pub use dummy::{NihilisticModel, OracleModel, RandomModel};
pub use knn::TfidfKnnModel;

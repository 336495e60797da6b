pub mod calculations;
pub mod models;

pub use calculations::TaxEstimator;
pub use models::*;

//! Tax calculations.
//!
//! [`TaxEstimator`] turns a [`TaxInputs`](crate::TaxInputs) into a
//! [`TaxResult`](crate::TaxResult) using injected reference data.

pub mod common;
pub mod estimator;

pub use estimator::{
    TaxEstimator, compute_federal_tax, compute_state_tax, compute_taxable_income,
};

//! Loads tax-year reference data from CSV files.

mod loader;

pub use loader::{BracketRecord, DeductionRecord, TaxTableLoader, TaxTableLoaderError};

//! CSV loader for running many estimates at once.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Optional
//! columns may be left out entirely or left empty.
//!
//! | Column                 | Required | Notes |
//! |------------------------|----------|-------|
//! | `filing_status`        | yes      | `S`, `MFJ`, `HOH` or the full name |
//! | `annual_gross_income`  | yes      | e.g. `60000.00` |
//! | `pay_periods`          | yes      | 1 to 52 |
//! | `other_income`         | no       | |
//! | `itemized_deductions`  | no       | Non-empty switches the row to itemized |
//! | `tax_credits`          | no       | |
//! | `ytd_federal_withheld` | no       | |
//! | `ytd_state_withheld`   | no       | |
//! | `state`                | no       | US state name or code; defaults to `Utah` |
//!
//! ### Minimal example
//!
//! ```csv
//! filing_status,annual_gross_income,pay_periods
//! S,60000,26
//! ```

use std::path::Path;

use serde::Deserialize;
use tax_core::State;

use crate::form::{EstimateForm, ValidatedEstimate};

#[derive(Debug, Deserialize)]
struct CsvRow {
    filing_status: String,
    annual_gross_income: String,
    pay_periods: String,
    #[serde(default)]
    other_income: String,
    #[serde(default)]
    itemized_deductions: String,
    #[serde(default)]
    tax_credits: String,
    #[serde(default)]
    ytd_federal_withheld: String,
    #[serde(default)]
    ytd_state_withheld: String,
    #[serde(default)]
    state: String,
}

/// Errors that can occur while loading batch input.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("cannot read batch file: {0}")]
    Io(#[from] std::io::Error),

    /// Structural CSV problem (missing required column, ragged row, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row parsed but failed validation. `row` is 1-based, header excluded.
    #[error("row {row}: {}", .errors.join(" "))]
    InvalidRow { row: usize, errors: Vec<String> },
}

impl CsvRow {
    fn into_form(self) -> EstimateForm {
        let itemize = !self.itemized_deductions.trim().is_empty();
        let state = if self.state.trim().is_empty() {
            State::Utah.label().to_string()
        } else {
            self.state
        };

        EstimateForm {
            filing_status: self.filing_status,
            state,
            annual_gross_income: self.annual_gross_income,
            other_income: self.other_income,
            itemize,
            itemized_deductions: self.itemized_deductions,
            tax_credits: self.tax_credits,
            pay_frequency: String::new(),
            pay_periods: self.pay_periods,
            ytd_federal_withheld: self.ytd_federal_withheld,
            ytd_state_withheld: self.ytd_state_withheld,
        }
    }
}

/// Parse CSV text and validate each row. Rows are returned in file order;
/// the first invalid row stops the load.
pub fn load_from_str(input: &str) -> Result<Vec<ValidatedEstimate>, BatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let form = result?.into_form();
            form.validate()
                .map_err(|errors| BatchError::InvalidRow { row: idx + 1, errors })
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<ValidatedEstimate>, BatchError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{DeductionMode, FilingStatus};

    use super::*;

    const MINIMAL_CSV: &str = "\
filing_status,annual_gross_income,pay_periods
S,60000.00,26
";

    const FULL_CSV: &str = "\
filing_status,annual_gross_income,other_income,itemized_deductions,tax_credits,pay_periods,ytd_federal_withheld,ytd_state_withheld,state
MFJ,120000.00,4000.00,31000.00,2000.00,24,6000.00,2500.00,Utah
HOH,55000.00,,,,12,,,Nevada
";

    #[test]
    fn minimal_csv_uses_defaults() {
        let rows = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(rows.len(), 1);
        let inputs = &rows[0].inputs;
        assert_eq!(inputs.filing_status, FilingStatus::Single);
        assert_eq!(inputs.annual_gross_income, dec!(60000));
        assert_eq!(inputs.pay_periods.get(), 26);
        assert_eq!(inputs.deduction_mode, DeductionMode::Standard);
        assert_eq!(inputs.state, State::Utah);
        assert!(!rows[0].has_withholding);
    }

    #[test]
    fn full_csv_populates_every_field() {
        let rows = load_from_str(FULL_CSV).expect("should parse full CSV");

        assert_eq!(rows.len(), 2);

        let first = &rows[0].inputs;
        assert_eq!(first.filing_status, FilingStatus::MarriedFilingJointly);
        assert_eq!(first.other_income, dec!(4000));
        assert_eq!(first.deduction_mode, DeductionMode::Itemized);
        assert_eq!(first.itemized_deductions, dec!(31000));
        assert_eq!(first.tax_credits, dec!(2000));
        assert_eq!(first.ytd_federal_withheld, dec!(6000));
        assert_eq!(first.ytd_state_withheld, dec!(2500));
        assert!(rows[0].has_withholding);

        let second = &rows[1].inputs;
        assert_eq!(second.deduction_mode, DeductionMode::Standard);
        assert_eq!(second.state, State::Other);
        assert!(!rows[1].has_withholding);
    }

    #[test]
    fn invalid_row_reports_row_number() {
        let csv = "\
filing_status,annual_gross_income,pay_periods
S,60000,26
S,50000,60
";

        match load_from_str(csv) {
            Err(BatchError::InvalidRow { row, errors }) => {
                assert_eq!(row, 2);
                assert_eq!(errors.len(), 1);
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_column_is_parse_error() {
        let csv = "filing_status,annual_gross_income\nS,60000\n";

        assert!(matches!(load_from_str(csv), Err(BatchError::Parse(_))));
    }

    #[test]
    fn header_only_yields_no_rows() {
        let rows = load_from_str("filing_status,annual_gross_income,pay_periods\n").unwrap();

        assert!(rows.is_empty());
    }
}

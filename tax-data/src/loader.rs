use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{
    FilingStatus, StandardDeductionTable, StateTaxRates, TaxBracket, TaxBracketTable,
    TaxTableError, TaxYearConfig,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when loading tax reference data.
#[derive(Debug, Error)]
pub enum TaxTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unrecognised filing status '{status}' on row {row}")]
    InvalidFilingStatus { status: String, row: usize },

    #[error("no tax brackets found for tax year {0}")]
    NoBrackets(i32),

    #[error("invalid bracket schedule for tax year {tax_year}: {source}")]
    InvalidTable {
        tax_year: i32,
        #[source]
        source: TaxTableError,
    },
}

impl From<csv::Error> for TaxTableLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single row from the bracket CSV.
///
/// Columns: `tax_year`, `min_income` (lower edge of the band) and `rate`
/// (marginal rate as a decimal, e.g. `0.10`). Upper edges are implied by the
/// next row for the same year.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub min_income: Decimal,
    pub rate: Decimal,
}

/// A single row from the standard deduction CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionRecord {
    pub tax_year: i32,
    pub filing_status: FilingStatus,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
struct DeductionRow {
    tax_year: i32,
    filing_status: String,
    amount: Decimal,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader)
}

fn open(path: &Path) -> Result<File, TaxTableLoaderError> {
    File::open(path).map_err(|source| TaxTableLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loader for tax-year reference data stored as CSV.
///
/// One bracket file and one deduction file may hold several years; [`build`]
/// picks out the requested year.
///
/// [`build`]: TaxTableLoader::build
pub struct TaxTableLoader;

impl TaxTableLoader {
    /// Parse bracket rows from any reader, in file order.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, TaxTableLoaderError> {
        let mut records = Vec::new();
        for result in csv_reader(reader).deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }
        Ok(records)
    }

    /// Parse standard deduction rows. Filing status cells take the codes
    /// `S`, `MFJ` and `HOH` (or their full names).
    pub fn parse_deductions<R: Read>(
        reader: R
    ) -> Result<Vec<DeductionRecord>, TaxTableLoaderError> {
        csv_reader(reader)
            .deserialize::<DeductionRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row = result?;
                let filing_status = row.filing_status.parse::<FilingStatus>().map_err(|_| {
                    TaxTableLoaderError::InvalidFilingStatus {
                        status: row.filing_status.clone(),
                        row: idx + 1,
                    }
                })?;
                Ok(DeductionRecord {
                    tax_year: row.tax_year,
                    filing_status,
                    amount: row.amount,
                })
            })
            .collect()
    }

    /// Assemble a validated [`TaxYearConfig`] for `tax_year`.
    ///
    /// Bracket rows are sorted by `min_income` before validation, so file
    /// order does not matter. Filing statuses with no deduction row are
    /// logged and end up deducting nothing.
    pub fn build(
        tax_year: i32,
        brackets: &[BracketRecord],
        deductions: &[DeductionRecord],
        state_rates: StateTaxRates,
    ) -> Result<TaxYearConfig, TaxTableLoaderError> {
        let mut year_brackets: Vec<TaxBracket> = brackets
            .iter()
            .filter(|r| r.tax_year == tax_year)
            .map(|r| TaxBracket::new(r.min_income, r.rate))
            .collect();

        if year_brackets.is_empty() {
            return Err(TaxTableLoaderError::NoBrackets(tax_year));
        }
        year_brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));

        let brackets = TaxBracketTable::new(year_brackets)
            .map_err(|source| TaxTableLoaderError::InvalidTable { tax_year, source })?;

        let standard_deductions: StandardDeductionTable = deductions
            .iter()
            .filter(|r| r.tax_year == tax_year)
            .map(|r| (r.filing_status, r.amount))
            .collect();

        for status in FilingStatus::all() {
            if standard_deductions.get(*status).is_none() {
                warn!(
                    tax_year,
                    filing_status = %status,
                    "no standard deduction row"
                );
            }
        }

        debug!(
            tax_year,
            brackets = brackets.brackets().len(),
            deductions = standard_deductions.len(),
            "tax tables loaded"
        );

        Ok(TaxYearConfig {
            tax_year,
            brackets,
            standard_deductions,
            state_rates,
        })
    }

    /// Read both CSV files from disk and delegate to [`TaxTableLoader::build`].
    pub fn load_files(
        tax_year: i32,
        brackets_path: &Path,
        deductions_path: &Path,
        state_rates: StateTaxRates,
    ) -> Result<TaxYearConfig, TaxTableLoaderError> {
        let brackets = Self::parse_brackets(open(brackets_path)?)?;
        let deductions = Self::parse_deductions(open(deductions_path)?)?;
        Self::build(tax_year, &brackets, &deductions, state_rates)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const BRACKETS_CSV: &str = "\
tax_year,min_income,rate
2024,11600,0.12
2024,0,0.10
2024,47150,0.22
2023,0,0.10
";

    const DEDUCTIONS_CSV: &str = "\
tax_year,filing_status,amount
2024,S,14600
2024,MFJ,29200
2024,HOH,21900
";

    #[test]
    fn parse_brackets_reads_rows_in_file_order() {
        let records = TaxTableLoader::parse_brackets(BRACKETS_CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(
            records[0],
            BracketRecord {
                tax_year: 2024,
                min_income: dec!(11600),
                rate: dec!(0.12),
            }
        );
    }

    #[test]
    fn parse_brackets_rejects_non_numeric_rate() {
        let csv = "tax_year,min_income,rate\n2024,0,ten\n";

        let result = TaxTableLoader::parse_brackets(csv.as_bytes());

        assert!(matches!(result, Err(TaxTableLoaderError::CsvParse(_))));
    }

    #[test]
    fn parse_deductions_maps_codes_to_statuses() {
        let records = TaxTableLoader::parse_deductions(DEDUCTIONS_CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].filing_status, FilingStatus::MarriedFilingJointly);
        assert_eq!(records[1].amount, dec!(29200));
    }

    #[test]
    fn parse_deductions_reports_row_of_unknown_status() {
        let csv = "tax_year,filing_status,amount\n2024,S,14600\n2024,MFS,14600\n";

        let err = TaxTableLoader::parse_deductions(csv.as_bytes()).unwrap_err();

        match err {
            TaxTableLoaderError::InvalidFilingStatus { status, row } => {
                assert_eq!(status, "MFS");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidFilingStatus, got {other:?}"),
        }
    }

    #[test]
    fn build_selects_year_and_sorts_brackets() {
        let brackets = TaxTableLoader::parse_brackets(BRACKETS_CSV.as_bytes()).unwrap();
        let deductions = TaxTableLoader::parse_deductions(DEDUCTIONS_CSV.as_bytes()).unwrap();

        let config =
            TaxTableLoader::build(2024, &brackets, &deductions, StateTaxRates::default()).unwrap();

        let lower_bounds: Vec<Decimal> = config
            .brackets
            .brackets()
            .iter()
            .map(|b| b.min_income)
            .collect();
        assert_eq!(lower_bounds, vec![dec!(0), dec!(11600), dec!(47150)]);
        assert_eq!(config.tax_year, 2024);
        assert_eq!(
            config.standard_deductions.amount_for(FilingStatus::HeadOfHousehold),
            dec!(21900)
        );
    }

    #[test]
    fn build_without_rows_for_year_fails() {
        let brackets = TaxTableLoader::parse_brackets(BRACKETS_CSV.as_bytes()).unwrap();

        let result = TaxTableLoader::build(2030, &brackets, &[], StateTaxRates::default());

        assert!(matches!(result, Err(TaxTableLoaderError::NoBrackets(2030))));
    }

    #[test]
    fn build_rejects_schedule_without_zero_bracket() {
        let brackets = vec![BracketRecord {
            tax_year: 2024,
            min_income: dec!(500),
            rate: dec!(0.10),
        }];

        let result = TaxTableLoader::build(2024, &brackets, &[], StateTaxRates::default());

        assert!(matches!(
            result,
            Err(TaxTableLoaderError::InvalidTable {
                tax_year: 2024,
                source: TaxTableError::FirstBracketNotZero(_),
            })
        ));
    }

    #[test]
    fn build_rejects_duplicate_lower_bounds() {
        let brackets = vec![
            BracketRecord {
                tax_year: 2024,
                min_income: dec!(0),
                rate: dec!(0.10),
            },
            BracketRecord {
                tax_year: 2024,
                min_income: dec!(0),
                rate: dec!(0.12),
            },
        ];

        let result = TaxTableLoader::build(2024, &brackets, &[], StateTaxRates::default());

        assert!(matches!(
            result,
            Err(TaxTableLoaderError::InvalidTable { .. })
        ));
    }

    #[test]
    fn build_tolerates_missing_deduction_rows() {
        let brackets = TaxTableLoader::parse_brackets(BRACKETS_CSV.as_bytes()).unwrap();

        let config =
            TaxTableLoader::build(2024, &brackets, &[], StateTaxRates::default()).unwrap();

        assert!(config.standard_deductions.is_empty());
        assert_eq!(
            config.standard_deductions.amount_for(FilingStatus::Single),
            Decimal::ZERO
        );
    }

    #[test]
    fn load_files_reports_missing_path() {
        let result = TaxTableLoader::load_files(
            2024,
            Path::new("does/not/exist.csv"),
            Path::new("also/missing.csv"),
            StateTaxRates::default(),
        );

        match result {
            Err(TaxTableLoaderError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("does/not/exist.csv"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FilingStatus, StandardDeductionTable, StateTaxRates, TaxBracketTable};

/// Reference data for one tax year.
///
/// Built once at startup and handed to the estimator by reference; nothing
/// mutates it afterwards.
///
/// The federal schedule is a single-filer schedule applied to every filing
/// status. Only the standard deduction varies by status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub brackets: TaxBracketTable,
    pub standard_deductions: StandardDeductionTable,
    pub state_rates: StateTaxRates,
}

impl TaxYearConfig {
    pub fn tax_year_2024() -> Self {
        let standard_deductions = StandardDeductionTable::new()
            .with_amount(FilingStatus::Single, Decimal::from(14_600))
            .with_amount(FilingStatus::MarriedFilingJointly, Decimal::from(29_200))
            .with_amount(FilingStatus::HeadOfHousehold, Decimal::from(21_900));

        Self {
            tax_year: 2024,
            brackets: TaxBracketTable::federal_single_2024(),
            standard_deductions,
            state_rates: StateTaxRates::default(),
        }
    }
}

impl Default for TaxYearConfig {
    fn default() -> Self {
        Self::tax_year_2024()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn tax_year_2024_has_deduction_for_every_status() {
        let config = TaxYearConfig::tax_year_2024();

        assert_eq!(config.tax_year, 2024);
        assert_eq!(config.standard_deductions.len(), FilingStatus::all().len());
        assert_eq!(
            config.standard_deductions.amount_for(FilingStatus::Single),
            dec!(14600)
        );
        assert_eq!(
            config
                .standard_deductions
                .amount_for(FilingStatus::MarriedFilingJointly),
            dec!(29200)
        );
        assert_eq!(
            config
                .standard_deductions
                .amount_for(FilingStatus::HeadOfHousehold),
            dec!(21900)
        );
    }
}

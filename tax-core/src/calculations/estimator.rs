//! Federal and state liability estimate with a break-even withholding
//! recommendation.
//!
//! # Steps
//!
//! | Step | Value |
//! |------|-------|
//! | 1    | Deduction: itemized amount, or the standard deduction for the filing status |
//! | 2    | Taxable income: gross + other income - deduction, minimum 0 |
//! | 3    | Federal tax from the progressive bracket schedule |
//! | 4    | State tax: taxable income × the state's flat rate (0 for other states) |
//! | 5    | Total tax: federal + state - credits (not floored) |
//! | 6    | Withheld so far: YTD federal + YTD state |
//! | 7    | Balance: withheld - total tax (positive = refund) |
//! | 8    | Per-period withholding: (total tax - withheld) / pay periods, minimum 0 |
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroU32;
//!
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::common::round_half_up;
//! use tax_core::{FilingStatus, State, TaxEstimator, TaxInputs, TaxYearConfig};
//!
//! let config = TaxYearConfig::tax_year_2024();
//! let estimator = TaxEstimator::new(&config);
//!
//! let inputs = TaxInputs {
//!     filing_status: FilingStatus::Single,
//!     annual_gross_income: dec!(60000),
//!     pay_periods: NonZeroU32::new(26).unwrap(),
//!     state: State::Utah,
//!     ..TaxInputs::default()
//! };
//!
//! let result = estimator.estimate(&inputs);
//!
//! assert_eq!(result.taxable_income, dec!(45400));
//! assert_eq!(result.federal_tax, dec!(5216));
//! assert_eq!(result.state_tax, dec!(2201.9));
//! assert_eq!(result.total_tax, dec!(7417.9));
//! assert_eq!(round_half_up(result.recommended_withholding_per_period), dec!(285.30));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use crate::calculations::common::floor_at_zero;
use crate::{
    DeductionMode, State, StandardDeductionTable, StateTaxRates, TaxBracketTable, TaxInputs,
    TaxResult, TaxYearConfig,
};

/// Gross plus other income, less the selected deduction, never below zero.
///
/// A filing status missing from `standard_deductions` deducts nothing.
pub fn compute_taxable_income(
    inputs: &TaxInputs,
    standard_deductions: &StandardDeductionTable,
) -> Decimal {
    taxable_income_with_deduction(inputs, standard_deductions).0
}

/// Progressive federal tax on `taxable_income`.
pub fn compute_federal_tax(
    taxable_income: Decimal,
    brackets: &TaxBracketTable,
) -> Decimal {
    brackets.tax_for(taxable_income)
}

/// Flat-rate state tax. States without a rate owe nothing.
pub fn compute_state_tax(
    taxable_income: Decimal,
    state: State,
    rates: &StateTaxRates,
) -> Decimal {
    taxable_income * rates.rate_for(state)
}

/// Taxable income together with the deduction taken and whether it was the
/// itemized amount.
fn taxable_income_with_deduction(
    inputs: &TaxInputs,
    standard_deductions: &StandardDeductionTable,
) -> (Decimal, Decimal, bool) {
    let (deduction, itemized) = select_deduction(inputs, standard_deductions);
    let taxable_income =
        floor_at_zero(inputs.annual_gross_income + inputs.other_income - deduction);
    (taxable_income, deduction, itemized)
}

fn select_deduction(
    inputs: &TaxInputs,
    standard_deductions: &StandardDeductionTable,
) -> (Decimal, bool) {
    match inputs.deduction_mode {
        DeductionMode::Itemized => (inputs.itemized_deductions, true),
        DeductionMode::Standard => {
            let amount = standard_deductions.get(inputs.filing_status).unwrap_or_else(|| {
                warn!(
                    filing_status = %inputs.filing_status,
                    "no standard deduction configured; deducting 0"
                );
                Decimal::ZERO
            });
            (amount, false)
        }
    }
}

/// Stateless estimator over one year's reference data.
///
/// Holds only a shared reference to the configuration, so one estimator can
/// serve any number of calculations, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct TaxEstimator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> TaxEstimator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Runs the full estimate. Total over valid inputs: there is no error case.
    pub fn estimate(
        &self,
        inputs: &TaxInputs,
    ) -> TaxResult {
        let (taxable_income, deduction, used_itemized_deduction) =
            taxable_income_with_deduction(inputs, &self.config.standard_deductions);

        let federal_tax = self.compute_federal_tax(taxable_income);
        let state_tax = self.compute_state_tax(taxable_income, inputs.state);

        let total_tax = federal_tax + state_tax - inputs.tax_credits;
        let total_withheld_ytd = inputs.ytd_federal_withheld + inputs.ytd_state_withheld;
        let deficit_or_refund = total_withheld_ytd - total_tax;

        let remaining = total_tax - total_withheld_ytd;
        let recommended_withholding_per_period =
            floor_at_zero(remaining / Decimal::from(inputs.pay_periods.get()));

        debug!(
            tax_year = self.config.tax_year,
            filing_status = inputs.filing_status.as_str(),
            %taxable_income,
            %federal_tax,
            %state_tax,
            %total_tax,
            %deficit_or_refund,
            "estimate complete"
        );

        TaxResult {
            taxable_income,
            deduction,
            used_itemized_deduction,
            federal_tax,
            state_tax,
            total_tax,
            total_withheld_ytd,
            deficit_or_refund,
            recommended_withholding_per_period,
        }
    }

    pub fn compute_taxable_income(
        &self,
        inputs: &TaxInputs,
    ) -> Decimal {
        compute_taxable_income(inputs, &self.config.standard_deductions)
    }

    pub fn compute_federal_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let tax = compute_federal_tax(taxable_income, &self.config.brackets);
        trace!(%taxable_income, %tax, "federal tax");
        tax
    }

    pub fn compute_state_tax(
        &self,
        taxable_income: Decimal,
        state: State,
    ) -> Decimal {
        compute_state_tax(taxable_income, state, &self.config.state_rates)
    }
}

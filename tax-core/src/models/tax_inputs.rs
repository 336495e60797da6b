use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{DeductionMode, FilingStatus, PayFrequency, State};

/// A monetary input outside `0..=TaxInputs::MAX_AMOUNT`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxInputsError {
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    #[error("{field} must not exceed {max}, got {value}", max = TaxInputs::MAX_AMOUNT)]
    TooLarge { field: &'static str, value: Decimal },
}

/// Everything the estimator needs for one calculation.
///
/// All monetary values are expected to lie within `0..=MAX_AMOUNT`. The
/// estimator does not check this; callers collecting raw input should run
/// [`TaxInputs::validate`] first. Within that range no step of the estimate
/// can overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInputs {
    pub filing_status: FilingStatus,
    pub annual_gross_income: Decimal,
    /// Dividends, side jobs and similar income on top of wages.
    pub other_income: Decimal,
    pub deduction_mode: DeductionMode,
    /// Only used when `deduction_mode` is [`DeductionMode::Itemized`].
    pub itemized_deductions: Decimal,
    pub tax_credits: Decimal,
    /// Pay periods per year, or the periods remaining in the year.
    pub pay_periods: NonZeroU32,
    #[serde(default)]
    pub ytd_federal_withheld: Decimal,
    #[serde(default)]
    pub ytd_state_withheld: Decimal,
    pub state: State,
}

impl TaxInputs {
    /// Largest accepted monetary amount: one quadrillion dollars.
    pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

    /// Reports the first amount that is negative or above [`Self::MAX_AMOUNT`].
    pub fn validate(&self) -> Result<(), TaxInputsError> {
        let fields = [
            ("annual_gross_income", self.annual_gross_income),
            ("other_income", self.other_income),
            ("itemized_deductions", self.itemized_deductions),
            ("tax_credits", self.tax_credits),
            ("ytd_federal_withheld", self.ytd_federal_withheld),
            ("ytd_state_withheld", self.ytd_state_withheld),
        ];

        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(TaxInputsError::Negative { field, value });
            }
            if value > Self::MAX_AMOUNT {
                return Err(TaxInputsError::TooLarge { field, value });
            }
        }
        Ok(())
    }
}

impl Default for TaxInputs {
    fn default() -> Self {
        Self {
            filing_status: FilingStatus::Single,
            annual_gross_income: Decimal::ZERO,
            other_income: Decimal::ZERO,
            deduction_mode: DeductionMode::Standard,
            itemized_deductions: Decimal::ZERO,
            tax_credits: Decimal::ZERO,
            pay_periods: PayFrequency::default().periods_per_year(),
            ytd_federal_withheld: Decimal::ZERO,
            ytd_state_withheld: Decimal::ZERO,
            state: State::Utah,
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Output of a single estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Gross plus other income, less the deduction, floored at zero.
    pub taxable_income: Decimal,

    /// Deduction that was subtracted (standard or itemized).
    pub deduction: Decimal,

    pub used_itemized_deduction: bool,

    pub federal_tax: Decimal,

    pub state_tax: Decimal,

    /// Federal plus state tax, less credits. Negative when credits exceed
    /// the liability.
    pub total_tax: Decimal,

    pub total_withheld_ytd: Decimal,

    /// Withheld so far minus total tax. Positive is a refund, negative is an
    /// amount owed.
    pub deficit_or_refund: Decimal,

    /// Withholding per remaining pay period that brings the balance to zero.
    /// Never negative.
    pub recommended_withholding_per_period: Decimal,
}

/// How the year settles if nothing more is withheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    Refund(Decimal),
    Owe(Decimal),
    BreakEven,
}

impl TaxResult {
    pub fn settlement(&self) -> Settlement {
        if self.deficit_or_refund > Decimal::ZERO {
            Settlement::Refund(self.deficit_or_refund)
        } else if self.deficit_or_refund < Decimal::ZERO {
            Settlement::Owe(-self.deficit_or_refund)
        } else {
            Settlement::BreakEven
        }
    }
}

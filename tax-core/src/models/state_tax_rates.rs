use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::State;

/// Flat state income tax rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxRates {
    pub utah: Decimal,
}

impl StateTaxRates {
    /// Utah's 2024 flat rate of 4.85%.
    pub const UTAH_2024: Decimal = Decimal::from_parts(485, 0, 0, false, 4);

    /// Flat rate applied for `state`. Jurisdictions without a rate return 0.
    pub fn rate_for(
        &self,
        state: State,
    ) -> Decimal {
        match state {
            State::Utah => self.utah,
            State::Other => Decimal::ZERO,
        }
    }
}

impl Default for StateTaxRates {
    fn default() -> Self {
        Self {
            utah: Self::UTAH_2024,
        }
    }
}

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// Standard deduction amounts keyed by filing status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDeductionTable {
    amounts: BTreeMap<FilingStatus, Decimal>,
}

impl StandardDeductionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the amount for `status`, replacing any previous value.
    pub fn with_amount(
        mut self,
        status: FilingStatus,
        amount: Decimal,
    ) -> Self {
        self.insert(status, amount);
        self
    }

    pub fn insert(
        &mut self,
        status: FilingStatus,
        amount: Decimal,
    ) {
        self.amounts.insert(status, amount);
    }

    pub fn get(
        &self,
        status: FilingStatus,
    ) -> Option<Decimal> {
        self.amounts.get(&status).copied()
    }

    /// The deduction for `status`, or 0 when the table has no entry for it.
    pub fn amount_for(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        self.get(status).unwrap_or(Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl FromIterator<(FilingStatus, Decimal)> for StandardDeductionTable {
    fn from_iter<I: IntoIterator<Item = (FilingStatus, Decimal)>>(iter: I) -> Self {
        Self {
            amounts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn amount_for_returns_configured_value() {
        let table = StandardDeductionTable::new().with_amount(FilingStatus::Single, dec!(14600));

        assert_eq!(table.amount_for(FilingStatus::Single), dec!(14600));
    }

    #[test]
    fn amount_for_missing_status_is_zero() {
        let table = StandardDeductionTable::new().with_amount(FilingStatus::Single, dec!(14600));

        assert_eq!(table.amount_for(FilingStatus::HeadOfHousehold), Decimal::ZERO);
        assert_eq!(table.get(FilingStatus::HeadOfHousehold), None);
    }

    #[test]
    fn later_insert_replaces_earlier_amount() {
        let table: StandardDeductionTable = [
            (FilingStatus::Single, dec!(13850)),
            (FilingStatus::Single, dec!(14600)),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.len(), 1);
        assert_eq!(table.amount_for(FilingStatus::Single), dec!(14600));
    }
}

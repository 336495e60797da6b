use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One band of a progressive schedule. The band runs from `min_income` up to
/// the next bracket's `min_income` (or without limit for the last bracket).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            tax_rate,
        }
    }
}

/// Errors raised when a bracket schedule is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxTableError {
    #[error("bracket schedule is empty")]
    Empty,

    #[error("first bracket must start at 0, found {0}")]
    FirstBracketNotZero(Decimal),

    #[error("bracket {index} starts at {min_income}, which is not above the previous bracket")]
    NotIncreasing { index: usize, min_income: Decimal },

    #[error("bracket {index} has rate {rate} outside 0..=1")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// An ordered, validated progressive tax schedule.
///
/// Invariants (checked by [`TaxBracketTable::new`]):
/// - at least one bracket
/// - the first bracket starts at 0
/// - `min_income` is strictly increasing
/// - every rate lies in `0..=1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxBracketTable {
    brackets: Vec<TaxBracket>,
}

impl TaxBracketTable {
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, TaxTableError> {
        let first = brackets.first().ok_or(TaxTableError::Empty)?;
        if !first.min_income.is_zero() {
            return Err(TaxTableError::FirstBracketNotZero(first.min_income));
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return Err(TaxTableError::RateOutOfRange {
                    index,
                    rate: bracket.tax_rate,
                });
            }
        }

        for (index, pair) in brackets.windows(2).enumerate() {
            if pair[1].min_income <= pair[0].min_income {
                return Err(TaxTableError::NotIncreasing {
                    index: index + 1,
                    min_income: pair[1].min_income,
                });
            }
        }

        Ok(Self { brackets })
    }

    /// The 2024 single-filer federal schedule.
    pub fn federal_single_2024() -> Self {
        let brackets = [
            (0_i64, 10),
            (11_600, 12),
            (47_150, 22),
            (100_525, 24),
            (191_950, 32),
            (243_725, 35),
            (609_350, 37),
        ]
        .into_iter()
        .map(|(min_income, percent)| {
            TaxBracket::new(Decimal::from(min_income), Decimal::new(percent, 2))
        })
        .collect();

        Self { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Upper edge of bracket `index`, or `None` for the open-ended top bracket.
    pub fn upper_bound(
        &self,
        index: usize,
    ) -> Option<Decimal> {
        self.brackets.get(index + 1).map(|next| next.min_income)
    }

    /// Progressive tax on `taxable_income`.
    ///
    /// Only the slice of income inside each band is taxed at that band's rate.
    /// Brackets are walked in ascending order and the walk stops at the first
    /// bracket the income does not reach. Returns 0 for income of 0 or less.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{TaxBracket, TaxBracketTable};
    ///
    /// let table = TaxBracketTable::new(vec![
    ///     TaxBracket::new(dec!(0), dec!(0.10)),
    ///     TaxBracket::new(dec!(11600), dec!(0.12)),
    ///     TaxBracket::new(dec!(47150), dec!(0.22)),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(table.tax_for(dec!(50000)), dec!(6053));
    /// ```
    pub fn tax_for(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let mut tax = Decimal::ZERO;

        for (index, bracket) in self.brackets.iter().enumerate() {
            if taxable_income <= bracket.min_income {
                break;
            }

            let top = match self.upper_bound(index) {
                Some(upper) => taxable_income.min(upper),
                None => taxable_income,
            };
            tax += (top - bracket.min_income) * bracket.tax_rate;
        }

        tax
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxBracketTable {
    type Error = TaxTableError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<TaxBracketTable> for Vec<TaxBracket> {
    fn from(table: TaxBracketTable) -> Self {
        table.brackets
    }
}

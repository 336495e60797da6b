//! Raw estimate form and its validation into [`TaxInputs`].

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use tax_core::{DeductionMode, FilingStatus, PayFrequency, State, TaxInputs};

use crate::utils::{format_currency, parse_optional_decimal};

/// Largest accepted pay-period count (weekly pay).
pub const MAX_PAY_PERIODS: u32 = 52;

/// Form values exactly as the user typed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateForm {
    pub filing_status: String,
    pub state: String,
    pub annual_gross_income: String,
    pub other_income: String,
    pub itemize: bool,
    pub itemized_deductions: String,
    pub tax_credits: String,
    pub pay_frequency: String,
    /// Explicit period count; overrides `pay_frequency` when non-empty.
    pub pay_periods: String,
    pub ytd_federal_withheld: String,
    pub ytd_state_withheld: String,
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEstimate {
    pub inputs: TaxInputs,
    /// Set when the period count came from a pay frequency.
    pub pay_frequency: Option<PayFrequency>,
    /// Whether any year-to-date withholding was entered.
    pub has_withholding: bool,
}

impl Default for EstimateForm {
    fn default() -> Self {
        Self {
            filing_status: FilingStatus::Single.as_str().to_string(),
            state: State::Utah.label().to_string(),
            annual_gross_income: String::new(),
            other_income: String::new(),
            itemize: false,
            itemized_deductions: String::new(),
            tax_credits: String::new(),
            pay_frequency: PayFrequency::BiWeekly.label().to_string(),
            pay_periods: String::new(),
            ytd_federal_withheld: String::new(),
            ytd_state_withheld: String::new(),
        }
    }
}

impl EstimateForm {
    /// Parse every field, collecting all problems rather than stopping at the
    /// first one.
    ///
    /// Rules:
    /// - amounts must parse and lie within `0..=TaxInputs::MAX_AMOUNT`
    ///   (empty means 0)
    /// - gross income is required
    /// - pay periods must be within `1..=52`
    /// - filing status, state and pay frequency must be recognised; a state
    ///   is Utah, `Other` or a US state name or postal code
    pub fn validate(&self) -> Result<ValidatedEstimate, Vec<String>> {
        let mut errors = Vec::new();

        let filing_status = self.filing_status.parse::<FilingStatus>().ok();
        if filing_status.is_none() {
            errors.push(format!("Unknown filing status '{}'.", self.filing_status));
        }

        let state = State::parse(&self.state);
        if state.is_none() {
            if self.state.trim().is_empty() {
                errors.push("State is required.".to_string());
            } else {
                errors.push(format!("Unknown state '{}'.", self.state.trim()));
            }
        }

        if self.annual_gross_income.trim().is_empty() {
            errors.push("Annual gross income is required.".to_string());
        }
        let annual_gross_income =
            amount(&mut errors, "Annual gross income", &self.annual_gross_income);
        let other_income = amount(&mut errors, "Other income", &self.other_income);
        let itemized_deductions = if self.itemize {
            amount(&mut errors, "Itemized deductions", &self.itemized_deductions)
        } else {
            Decimal::ZERO
        };
        let tax_credits = amount(&mut errors, "Tax credits", &self.tax_credits);

        let ytd_federal = optional_amount(
            &mut errors,
            "YTD federal withholding",
            &self.ytd_federal_withheld,
        );
        let ytd_state =
            optional_amount(&mut errors, "YTD state withholding", &self.ytd_state_withheld);

        let (pay_periods, pay_frequency) = self.pay_periods(&mut errors);

        match (filing_status, state, pay_periods) {
            (Some(filing_status), Some(state), Some(pay_periods)) if errors.is_empty() => {
                let inputs = TaxInputs {
                    filing_status,
                    annual_gross_income,
                    other_income,
                    deduction_mode: if self.itemize {
                        DeductionMode::Itemized
                    } else {
                        DeductionMode::Standard
                    },
                    itemized_deductions,
                    tax_credits,
                    pay_periods,
                    ytd_federal_withheld: ytd_federal.unwrap_or_default(),
                    ytd_state_withheld: ytd_state.unwrap_or_default(),
                    state,
                };
                inputs.validate().map_err(|e| vec![e.to_string()])?;

                Ok(ValidatedEstimate {
                    inputs,
                    pay_frequency,
                    has_withholding: ytd_federal.is_some() || ytd_state.is_some(),
                })
            }
            _ => Err(errors),
        }
    }

    fn pay_periods(
        &self,
        errors: &mut Vec<String>,
    ) -> (Option<NonZeroU32>, Option<PayFrequency>) {
        let explicit = self.pay_periods.trim();
        if !explicit.is_empty() {
            let periods = explicit
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=MAX_PAY_PERIODS).contains(n))
                .and_then(NonZeroU32::new);
            if periods.is_none() {
                errors.push(format!(
                    "Pay periods must be a whole number from 1 to {MAX_PAY_PERIODS}, got '{explicit}'."
                ));
            }
            return (periods, None);
        }

        match PayFrequency::parse(&self.pay_frequency) {
            Some(freq) => (Some(freq.periods_per_year()), Some(freq)),
            None => {
                errors.push(format!("Unknown pay frequency '{}'.", self.pay_frequency));
                (None, None)
            }
        }
    }
}

fn amount(
    errors: &mut Vec<String>,
    label: &str,
    raw: &str,
) -> Decimal {
    optional_amount(errors, label, raw).unwrap_or_default()
}

fn optional_amount(
    errors: &mut Vec<String>,
    label: &str,
    raw: &str,
) -> Option<Decimal> {
    match parse_optional_decimal(raw) {
        Ok(Some(value)) if value < Decimal::ZERO => {
            errors.push(format!("{label} cannot be negative."));
            None
        }
        Ok(Some(value)) if value > TaxInputs::MAX_AMOUNT => {
            errors.push(format!(
                "{label} cannot exceed {}.",
                format_currency(TaxInputs::MAX_AMOUNT)
            ));
            None
        }
        Ok(value) => value,
        Err(e) => {
            errors.push(format!("{label}: {e}."));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn filled_form() -> EstimateForm {
        EstimateForm {
            annual_gross_income: "60,000".to_string(),
            ..EstimateForm::default()
        }
    }

    #[test]
    fn validate_defaults_to_bi_weekly_standard_utah() {
        let validated = filled_form().validate().unwrap();

        assert_eq!(validated.inputs.filing_status, FilingStatus::Single);
        assert_eq!(validated.inputs.annual_gross_income, dec!(60000));
        assert_eq!(validated.inputs.deduction_mode, DeductionMode::Standard);
        assert_eq!(validated.inputs.pay_periods.get(), 26);
        assert_eq!(validated.inputs.state, State::Utah);
        assert_eq!(validated.pay_frequency, Some(PayFrequency::BiWeekly));
        assert!(!validated.has_withholding);
    }

    #[test]
    fn validate_explicit_periods_override_frequency() {
        let form = EstimateForm {
            pay_periods: "9".to_string(),
            ..filled_form()
        };

        let validated = form.validate().unwrap();

        assert_eq!(validated.inputs.pay_periods.get(), 9);
        assert_eq!(validated.pay_frequency, None);
    }

    #[test]
    fn validate_rejects_pay_periods_out_of_range() {
        for raw in ["0", "53", "-1", "two"] {
            let form = EstimateForm {
                pay_periods: raw.to_string(),
                ..filled_form()
            };

            let errors = form.validate().unwrap_err();

            assert_eq!(errors.len(), 1, "input {raw}");
            assert!(errors[0].starts_with("Pay periods"), "input {raw}");
        }
    }

    #[test]
    fn validate_itemized_amount_only_used_when_itemizing() {
        let standard = EstimateForm {
            itemized_deductions: "20000".to_string(),
            ..filled_form()
        };
        let itemized = EstimateForm {
            itemize: true,
            ..standard.clone()
        };

        assert_eq!(standard.validate().unwrap().inputs.itemized_deductions, dec!(0));

        let inputs = itemized.validate().unwrap().inputs;
        assert_eq!(inputs.deduction_mode, DeductionMode::Itemized);
        assert_eq!(inputs.itemized_deductions, dec!(20000));
    }

    #[test]
    fn validate_tracks_supplied_withholding() {
        let form = EstimateForm {
            ytd_state_withheld: "0".to_string(),
            ..filled_form()
        };

        let validated = form.validate().unwrap();

        assert!(validated.has_withholding);
        assert_eq!(validated.inputs.ytd_federal_withheld, dec!(0));
    }

    #[test]
    fn validate_collects_every_error() {
        let form = EstimateForm {
            filing_status: "MFS".to_string(),
            annual_gross_income: String::new(),
            other_income: "-5".to_string(),
            tax_credits: "lots".to_string(),
            pay_frequency: "daily".to_string(),
            ..EstimateForm::default()
        };

        let errors = form.validate().unwrap_err();

        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&"Unknown filing status 'MFS'.".to_string()));
        assert!(errors.contains(&"Annual gross income is required.".to_string()));
        assert!(errors.contains(&"Other income cannot be negative.".to_string()));
        assert!(errors.contains(&"Unknown pay frequency 'daily'.".to_string()));
    }

    #[test]
    fn validate_rejects_amounts_above_maximum() {
        let form = EstimateForm {
            annual_gross_income: "79228162514264337593543950335".to_string(),
            other_income: "1".to_string(),
            ..EstimateForm::default()
        };

        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors,
            vec!["Annual gross income cannot exceed $1,000,000,000,000,000.00.".to_string()]
        );
    }

    #[test]
    fn validate_accepts_maximum_amount() {
        let form = EstimateForm {
            annual_gross_income: "1,000,000,000,000,000".to_string(),
            other_income: "1,000,000,000,000,000".to_string(),
            ..EstimateForm::default()
        };

        let inputs = form.validate().unwrap().inputs;

        assert_eq!(inputs.annual_gross_income, TaxInputs::MAX_AMOUNT);
    }

    #[test]
    fn validate_rejects_misspelled_state() {
        let form = EstimateForm {
            state: "Utha".to_string(),
            ..filled_form()
        };

        assert_eq!(form.validate().unwrap_err(), vec!["Unknown state 'Utha'.".to_string()]);
    }

    #[test]
    fn validate_requires_state() {
        let form = EstimateForm {
            state: "  ".to_string(),
            ..filled_form()
        };

        assert_eq!(form.validate().unwrap_err(), vec!["State is required.".to_string()]);
    }

    #[test]
    fn validate_accepts_full_labels() {
        let form = EstimateForm {
            filing_status: "Head of Household".to_string(),
            state: "Nevada".to_string(),
            pay_frequency: "Monthly".to_string(),
            ..filled_form()
        };

        let inputs = form.validate().unwrap().inputs;

        assert_eq!(inputs.filing_status, FilingStatus::HeadOfHousehold);
        assert_eq!(inputs.state, State::Other);
        assert_eq!(inputs.pay_periods.get(), 12);
    }
}

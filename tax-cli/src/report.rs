//! Turns a [`TaxResult`] into the text shown to the user.

use rust_decimal::Decimal;
use tax_core::{PayFrequency, Settlement, State, TaxResult};

use crate::utils::format_currency;

/// What the report needs to know beyond the numbers themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub state: State,
    pub pay_frequency: Option<PayFrequency>,
    pub has_withholding: bool,
}

fn period_phrase(pay_frequency: Option<PayFrequency>) -> String {
    match pay_frequency {
        Some(freq) => format!("per {} paycheck", freq.label().to_lowercase()),
        None => "per remaining pay period".to_string(),
    }
}

fn settlement_line(result: &TaxResult) -> String {
    match result.settlement() {
        Settlement::Refund(amount) => format!(
            "At your current withholding you would receive a refund of {}.",
            format_currency(amount)
        ),
        Settlement::Owe(amount) => format!(
            "At your current withholding you would owe {}.",
            format_currency(amount)
        ),
        Settlement::BreakEven => "At your current withholding you would break even.".to_string(),
    }
}

/// Multi-line report for a single estimate.
pub fn render(
    result: &TaxResult,
    ctx: &RenderContext,
) -> String {
    let state_label = format!("Estimated State Tax ({}):", ctx.state);
    let deduction_label = if result.used_itemized_deduction {
        "Itemized Deduction:"
    } else {
        "Standard Deduction:"
    };

    let mut rows = vec![
        (deduction_label.to_string(), format_currency(result.deduction)),
        ("Taxable Income:".to_string(), format_currency(result.taxable_income)),
        ("Estimated Federal Tax:".to_string(), format_currency(result.federal_tax)),
        (state_label, format_currency(result.state_tax)),
        ("Total Tax Liability:".to_string(), format_currency(result.total_tax)),
    ];
    if ctx.has_withholding {
        rows.push((
            "Withheld So Far:".to_string(),
            format_currency(result.total_withheld_ytd),
        ));
    }

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut out = String::from("Results\n");
    for (label, value) in &rows {
        out.push_str(&format!("  {label:<width$}  {value:>14}\n"));
    }
    out.push('\n');

    if result.recommended_withholding_per_period > Decimal::ZERO {
        out.push_str(&format!(
            "You should withhold approximately {} {} to break even.\n",
            format_currency(result.recommended_withholding_per_period),
            period_phrase(ctx.pay_frequency)
        ));
    } else {
        out.push_str("No further withholding is needed to cover your estimated tax.\n");
    }

    if ctx.has_withholding {
        out.push_str(&settlement_line(result));
        out.push('\n');
    }

    out
}

/// One-line summary used for batch output.
pub fn summary_line(
    row: usize,
    result: &TaxResult,
) -> String {
    let balance = match result.settlement() {
        Settlement::Refund(amount) => format!("refund {}", format_currency(amount)),
        Settlement::Owe(amount) => format!("owe {}", format_currency(amount)),
        Settlement::BreakEven => "break even".to_string(),
    };

    format!(
        "row {row}: taxable {} | federal {} | state {} | total {} | per period {} | {balance}",
        format_currency(result.taxable_income),
        format_currency(result.federal_tax),
        format_currency(result.state_tax),
        format_currency(result.total_tax),
        format_currency(result.recommended_withholding_per_period),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_result() -> TaxResult {
        TaxResult {
            taxable_income: dec!(45400),
            deduction: dec!(14600),
            used_itemized_deduction: false,
            federal_tax: dec!(5216),
            state_tax: dec!(2201.9),
            total_tax: dec!(7417.9),
            total_withheld_ytd: dec!(0),
            deficit_or_refund: dec!(-7417.9),
            recommended_withholding_per_period: dec!(7417.9) / dec!(26),
        }
    }

    fn bi_weekly_utah() -> RenderContext {
        RenderContext {
            state: State::Utah,
            pay_frequency: Some(PayFrequency::BiWeekly),
            has_withholding: false,
        }
    }

    #[test]
    fn render_lists_liabilities_and_recommendation() {
        let text = render(&sample_result(), &bi_weekly_utah());

        assert!(text.contains("Estimated Federal Tax:"));
        assert!(text.contains("$5,216.00"));
        assert!(text.contains("Estimated State Tax (Utah):"));
        assert!(text.contains("$2,201.90"));
        assert!(text.contains("$7,417.90"));
        assert!(text.contains(
            "You should withhold approximately $285.30 per bi-weekly paycheck to break even."
        ));
    }

    #[test]
    fn render_omits_balance_without_withholding() {
        let text = render(&sample_result(), &bi_weekly_utah());

        assert!(!text.contains("Withheld So Far"));
        assert!(!text.contains("At your current withholding"));
    }

    #[test]
    fn render_reports_refund_when_over_withheld() {
        let result = TaxResult {
            total_withheld_ytd: dec!(8000),
            deficit_or_refund: dec!(582.1),
            recommended_withholding_per_period: dec!(0),
            ..sample_result()
        };
        let ctx = RenderContext {
            has_withholding: true,
            ..bi_weekly_utah()
        };

        let text = render(&result, &ctx);

        assert!(text.contains("Withheld So Far:"));
        assert!(text.contains("No further withholding is needed"));
        assert!(text.contains("you would receive a refund of $582.10."));
    }

    #[test]
    fn render_uses_remaining_periods_phrase_without_frequency() {
        let ctx = RenderContext {
            pay_frequency: None,
            ..bi_weekly_utah()
        };

        let text = render(&sample_result(), &ctx);

        assert!(text.contains("per remaining pay period"));
    }

    #[test]
    fn summary_line_shows_amount_owed() {
        let line = summary_line(3, &sample_result());

        assert_eq!(
            line,
            "row 3: taxable $45,400.00 | federal $5,216.00 | state $2,201.90 | total $7,417.90 | per period $285.30 | owe $7,417.90"
        );
    }

    #[test]
    fn summary_line_shows_break_even() {
        let result = TaxResult {
            deficit_or_refund: dec!(0),
            ..sample_result()
        };

        assert!(summary_line(1, &result).ends_with("| break even"));
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::form::EstimateForm;
use crate::settings::Settings;

/// Estimate federal and Utah income tax and the per-paycheck withholding
/// that breaks even at filing time.
#[derive(Debug, Parser)]
#[command(name = "tax-estimator", version, about)]
pub struct Cli {
    /// Settings file (TOML). Defaults to `tax-estimator.toml` if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Tax year to load from the bracket and deduction files.
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// CSV of federal brackets (`tax_year,min_income,rate`).
    #[arg(long, global = true)]
    pub brackets: Option<PathBuf>,

    /// CSV of standard deductions (`tax_year,filing_status,amount`).
    #[arg(long, global = true)]
    pub deductions: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tax_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate a single taxpayer from command-line values.
    Estimate(EstimateArgs),

    /// Estimate every row of a CSV file.
    Batch {
        /// CSV file with one taxpayer per row.
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// Filing status: S, MFJ, HOH (or the full name).
    #[arg(long, default_value = "S")]
    pub filing_status: String,

    /// Annual gross income, e.g. 60000 or "60,000".
    #[arg(long)]
    pub income: String,

    /// Dividends, side jobs and other income.
    #[arg(long)]
    pub other_income: Option<String>,

    /// Itemize with this amount instead of taking the standard deduction.
    #[arg(long)]
    pub itemized: Option<String>,

    /// Total tax credits.
    #[arg(long)]
    pub credits: Option<String>,

    /// Pay frequency: weekly, bi-weekly, semi-monthly or monthly.
    #[arg(long, default_value = "bi-weekly")]
    pub frequency: String,

    /// Pay periods left in the year (1-52); overrides --frequency.
    #[arg(long, conflicts_with = "frequency")]
    pub pay_periods: Option<String>,

    /// Federal tax withheld so far this year.
    #[arg(long)]
    pub ytd_federal: Option<String>,

    /// State tax withheld so far this year.
    #[arg(long)]
    pub ytd_state: Option<String>,

    /// State of residence: `Utah`, another US state name or postal code, or `Other`.
    #[arg(long, default_value = "Utah")]
    pub state: String,
}

impl From<EstimateArgs> for EstimateForm {
    fn from(args: EstimateArgs) -> Self {
        EstimateForm {
            filing_status: args.filing_status,
            state: args.state,
            annual_gross_income: args.income,
            other_income: args.other_income.unwrap_or_default(),
            itemize: args.itemized.is_some(),
            itemized_deductions: args.itemized.unwrap_or_default(),
            tax_credits: args.credits.unwrap_or_default(),
            pay_frequency: args.frequency,
            pay_periods: args.pay_periods.unwrap_or_default(),
            ytd_federal_withheld: args.ytd_federal.unwrap_or_default(),
            ytd_state_withheld: args.ytd_state.unwrap_or_default(),
        }
    }
}

impl Cli {
    /// Fold command-line overrides into the loaded settings.
    pub fn apply_to(
        &self,
        settings: &mut Settings,
    ) {
        if let Some(year) = self.year {
            settings.tables.tax_year = Some(year);
        }
        if let Some(path) = &self.brackets {
            settings.tables.brackets = Some(path.clone());
        }
        if let Some(path) = &self.deductions {
            settings.tables.deductions = Some(path.clone());
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
    }
}

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tax_core::{StateTaxRates, TaxEstimator, TaxYearConfig};
use tax_data::TaxTableLoader;
use tracing::{debug, info};

use crate::batch;
use crate::cli::{Cli, Command};
use crate::form::{EstimateForm, ValidatedEstimate};
use crate::report::{self, RenderContext};
use crate::settings::{Settings, TableSettings};

/// Build the reference data for this run: the CSV files when configured,
/// otherwise the built-in 2024 tables.
pub fn load_tax_year_config(tables: &TableSettings) -> Result<TaxYearConfig> {
    let state_rates = StateTaxRates {
        utah: tables.utah_rate.unwrap_or(StateTaxRates::UTAH_2024),
    };

    match (&tables.brackets, &tables.deductions) {
        (Some(brackets), Some(deductions)) => {
            let tax_year = tables
                .tax_year
                .context("a tax year is required when loading tables from files")?;
            info!(
                tax_year,
                brackets = %brackets.display(),
                deductions = %deductions.display(),
                "loading tax tables"
            );
            TaxTableLoader::load_files(tax_year, brackets, deductions, state_rates)
                .with_context(|| format!("failed to load tax tables for {tax_year}"))
        }
        (None, None) => {
            let builtin = TaxYearConfig::tax_year_2024();
            if let Some(year) = tables.tax_year.filter(|y| *y != builtin.tax_year) {
                bail!(
                    "no built-in tables for {year}; supply bracket and deduction files for that year"
                );
            }
            debug!(tax_year = builtin.tax_year, "using built-in tax tables");
            Ok(TaxYearConfig {
                state_rates,
                ..builtin
            })
        }
        _ => bail!("bracket and deduction files must be given together"),
    }
}

fn render_context(estimate: &ValidatedEstimate) -> RenderContext {
    RenderContext {
        state: estimate.inputs.state,
        pay_frequency: estimate.pay_frequency,
        has_withholding: estimate.has_withholding,
    }
}

/// Validate one form, estimate it and write the full report.
pub fn run_estimate<W: Write>(
    config: &TaxYearConfig,
    form: &EstimateForm,
    out: &mut W,
) -> Result<()> {
    let estimate = match form.validate() {
        Ok(estimate) => estimate,
        Err(errors) => bail!("invalid input:\n  {}", errors.join("\n  ")),
    };

    let result = TaxEstimator::new(config).estimate(&estimate.inputs);
    write!(out, "{}", report::render(&result, &render_context(&estimate)))?;
    Ok(())
}

/// Estimate every row of a batch file and write one summary line per row.
pub fn run_batch<W: Write>(
    config: &TaxYearConfig,
    path: &Path,
    out: &mut W,
) -> Result<usize> {
    let rows = batch::load_from_file(path)
        .with_context(|| format!("failed to load batch file '{}'", path.display()))?;

    let estimator = TaxEstimator::new(config);
    for (idx, estimate) in rows.iter().enumerate() {
        let result = estimator.estimate(&estimate.inputs);
        writeln!(out, "{}", report::summary_line(idx + 1, &result))?;
    }

    info!(rows = rows.len(), "batch complete");
    Ok(rows.len())
}

/// Run the parsed command with already-merged settings.
pub fn run<W: Write>(
    cli: Cli,
    settings: &Settings,
    out: &mut W,
) -> Result<()> {
    let config = load_tax_year_config(&settings.tables)?;

    match cli.command {
        Command::Estimate(args) => run_estimate(&config, &EstimateForm::from(args), out),
        Command::Batch { file } => run_batch(&config, &file, out).map(|_| ()),
    }
}

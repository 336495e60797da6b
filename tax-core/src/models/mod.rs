mod deduction_mode;
mod filing_status;
mod pay_frequency;
mod standard_deduction;
mod state;
mod state_tax_rates;
mod tax_bracket;
mod tax_inputs;
mod tax_result;
mod tax_year_config;

pub use deduction_mode::DeductionMode;
pub use filing_status::{FilingStatus, UnknownFilingStatus};
pub use pay_frequency::PayFrequency;
pub use standard_deduction::StandardDeductionTable;
pub use state::State;
pub use state_tax_rates::StateTaxRates;
pub use tax_bracket::{TaxBracket, TaxBracketTable, TaxTableError};
pub use tax_inputs::{TaxInputs, TaxInputsError};
pub use tax_result::{Settlement, TaxResult};
pub use tax_year_config::TaxYearConfig;

use serde::{Deserialize, Serialize};

/// Which deduction is subtracted from income.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeductionMode {
    #[default]
    Standard,
    Itemized,
}

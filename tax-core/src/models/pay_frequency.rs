use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

const WEEKLY: NonZeroU32 = NonZeroU32::new(52).unwrap();
const BI_WEEKLY: NonZeroU32 = NonZeroU32::new(26).unwrap();
const SEMI_MONTHLY: NonZeroU32 = NonZeroU32::new(24).unwrap();
const MONTHLY: NonZeroU32 = NonZeroU32::new(12).unwrap();

/// How often the taxpayer is paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayFrequency {
    Weekly,
    #[default]
    BiWeekly,
    SemiMonthly,
    Monthly,
}

impl PayFrequency {
    pub fn all() -> &'static [PayFrequency] {
        &[
            PayFrequency::Weekly,
            PayFrequency::BiWeekly,
            PayFrequency::SemiMonthly,
            PayFrequency::Monthly,
        ]
    }

    pub fn periods_per_year(&self) -> NonZeroU32 {
        match self {
            Self::Weekly => WEEKLY,
            Self::BiWeekly => BI_WEEKLY,
            Self::SemiMonthly => SEMI_MONTHLY,
            Self::Monthly => MONTHLY,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-Weekly",
            Self::SemiMonthly => "Semi-Monthly",
            Self::Monthly => "Monthly",
        }
    }

    /// Matches the label ignoring case, hyphens and spaces, so
    /// `bi-weekly`, `biweekly` and `Bi Weekly` are all accepted.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = normalize(s);
        Self::all()
            .iter()
            .copied()
            .find(|freq| normalize(freq.label()) == wanted)
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often the salary is paid out. Only used for the per-period view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    #[default]
    Annual,
    Monthly,
    Biweekly,
    Weekly,
}

impl PayFrequency {
    pub const ALL: [PayFrequency; 4] = [
        PayFrequency::Annual,
        PayFrequency::Monthly,
        PayFrequency::Biweekly,
        PayFrequency::Weekly,
    ];

    /// Fixed divisor, no calendar awareness: biweekly is always 26.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Annual => 1,
            Self::Monthly => 12,
            Self::Biweekly => 26,
            Self::Weekly => 52,
        }
    }

    pub fn periods(&self) -> Decimal {
        Decimal::from(self.periods_per_year())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Monthly => "monthly",
            Self::Biweekly => "biweekly",
            Self::Weekly => "weekly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" | "yearly" => Some(Self::Annual),
            "monthly" => Some(Self::Monthly),
            "biweekly" | "fortnightly" => Some(Self::Biweekly),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }
}

impl std::fmt::Display for PayFrequency {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

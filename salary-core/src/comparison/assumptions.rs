use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CountryCode, MaritalStatus};

/// Whether tax-advantaged retirement elections are filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetirementContributions {
    #[default]
    None,
    /// Every country's retirement elections up to their (shared) limits.
    Max,
}

/// Opt-in regimes that only exist in one country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecialRegimes {
    pub nl_thirty_percent_ruling: bool,
    pub pt_ifici: bool,
}

/// Generic questionnaire answers, mapped onto each country's own options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonAssumptions {
    pub marital_status: MaritalStatus,
    pub children: u8,
    pub baseline_country: Option<CountryCode>,
    /// `false` selects non-resident treatment where a country defines one.
    pub resident: bool,
    pub special_regimes: SpecialRegimes,
    pub us_state: String,
    pub age: u8,
    pub retirement_contributions: RetirementContributions,
}

impl Default for ComparisonAssumptions {
    fn default() -> Self {
        Self {
            marital_status: MaritalStatus::Single,
            children: 0,
            baseline_country: None,
            resident: true,
            special_regimes: SpecialRegimes::default(),
            us_state: "CA".to_string(),
            age: 30,
            retirement_contributions: RetirementContributions::None,
        }
    }
}

impl ComparisonAssumptions {
    pub fn is_married(&self) -> bool {
        self.marital_status.is_married()
    }

    /// Unmarried with at least one child.
    pub fn is_single_parent(&self) -> bool {
        !self.is_married() && self.children > 0
    }

    pub fn max_retirement(&self) -> bool {
        self.retirement_contributions == RetirementContributions::Max
    }
}

/// One base salary plus the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonInputs {
    pub base_salary: Decimal,
    pub base_currency: String,
    pub assumptions: ComparisonAssumptions,
}

impl Default for ComparisonInputs {
    fn default() -> Self {
        Self {
            base_salary: Decimal::from(100_000),
            base_currency: "USD".to_string(),
            assumptions: ComparisonAssumptions::default(),
        }
    }
}

//! Multi-country comparison: one base salary, one questionnaire, every
//! registered jurisdiction ranked by net pay in the base currency.

mod assumptions;
mod engine;
pub mod synthesis;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CalculationResult, CountryCode};

pub use assumptions::{
    ComparisonAssumptions, ComparisonInputs, RetirementContributions, SpecialRegimes,
};
pub use engine::{compare, compare_with_provider};
pub use synthesis::{SynthesizedInputs, synthesize};

/// One jurisdiction's row in a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryComparison {
    pub country: CountryCode,
    pub name: String,
    pub currency: String,
    /// Units of local currency per unit of the base currency.
    pub rate: Decimal,
    pub gross_local: Decimal,
    pub net_local: Decimal,
    pub net_base: Decimal,
    pub take_home_rate: Decimal,
    pub effective_tax_rate: Decimal,
    /// Difference to the baseline country's `net_base`; zero without one.
    pub delta_base: Decimal,
    pub delta_percent: Decimal,
    pub assumptions: Vec<String>,
    pub calculation: CalculationResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonOutput {
    pub is_ready: bool,
    pub base_currency: String,
    pub rates_updated_at: Option<DateTime<Utc>>,
    /// Sorted by `net_base`, highest first.
    pub results: Vec<CountryComparison>,
}

impl ComparisonOutput {
    pub fn not_ready(base_currency: impl Into<String>) -> Self {
        Self {
            is_ready: false,
            base_currency: base_currency.into(),
            rates_updated_at: None,
            results: Vec::new(),
        }
    }

    pub fn baseline(
        &self,
        code: CountryCode,
    ) -> Option<&CountryComparison> {
        self.results.iter().find(|row| row.country == code)
    }
}

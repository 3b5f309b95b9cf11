//! Per-jurisdiction calculators.
//!
//! Each submodule owns one country's tables, its input and breakdown
//! records, its [`CountryConfig`](crate::models::CountryConfig) and a unit
//! calculator implementing [`SalaryCalculator`].

pub mod au;
pub mod ca;
pub mod ch;
pub mod de;
pub mod hk;
pub mod id;
pub mod kr;
pub mod nl;
pub mod pt;
pub mod sg;
pub mod th;
pub mod tw;
pub mod uk;
pub mod us;

use rust_decimal::Decimal;

use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimits, CountryCode, PayFrequency,
};

/// Accessors and input shaping shared by every country's input record.
pub trait CountryInputs {
    fn gross_salary(&self) -> Decimal;

    fn set_gross_salary(
        &mut self,
        gross_salary: Decimal,
    );

    fn pay_frequency(&self) -> PayFrequency;

    fn set_pay_frequency(
        &mut self,
        frequency: PayFrequency,
    );

    /// State, province, canton or region code, where the country has one.
    fn region(&self) -> Option<String> {
        None
    }

    /// Returns `false` when the country has no regions or the code is unknown.
    fn set_region(
        &mut self,
        _region: &str,
    ) -> bool {
        false
    }

    /// Limits that apply to these inputs (some depend on age or coverage).
    fn contribution_limits(&self) -> ContributionLimits;

    /// Clamps elections and resolves exclusive options so the calculator can
    /// trust its input.
    fn normalized(self) -> Self
    where
        Self: Sized;
}

/// A pure, deterministic salary calculator for one jurisdiction.
pub trait SalaryCalculator: Send + Sync {
    fn country(&self) -> CountryCode;

    /// # Errors
    ///
    /// Returns [`CalculatorError::InvalidCountryInput`] when `inputs` is tagged
    /// for another country.
    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError>;
}

pub(crate) fn mismatch(
    expected: CountryCode,
    inputs: &CalculatorInputs,
) -> CalculatorError {
    CalculatorError::InvalidCountryInput {
        expected,
        actual: inputs.country(),
    }
}

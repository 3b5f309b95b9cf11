//! Calculator registry.
//!
//! Maps a country code to its calculator, configuration and default inputs.
//! Dispatch is an exhaustive match, so adding a country to [`CountryCode`]
//! fails to compile until it is registered here.

use tracing::debug;

use crate::countries::{
    SalaryCalculator, au, au::AuCalculator, ca, ca::CaCalculator, ch, ch::ChCalculator, de,
    de::DeCalculator, hk, hk::HkCalculator, id, id::IdCalculator, kr, kr::KrCalculator, nl,
    nl::NlCalculator, pt, pt::PtCalculator, sg, sg::SgCalculator, th, th::ThCalculator, tw,
    tw::TwCalculator, uk, uk::UkCalculator, us, us::UsCalculator,
};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimits, CountryCode, CountryConfig,
};

/// The calculator registered for `code`.
pub fn calculator_for(code: CountryCode) -> &'static dyn SalaryCalculator {
    match code {
        CountryCode::Us => &UsCalculator,
        CountryCode::Sg => &SgCalculator,
        CountryCode::Kr => &KrCalculator,
        CountryCode::Nl => &NlCalculator,
        CountryCode::Au => &AuCalculator,
        CountryCode::Pt => &PtCalculator,
        CountryCode::Th => &ThCalculator,
        CountryCode::Hk => &HkCalculator,
        CountryCode::Id => &IdCalculator,
        CountryCode::Tw => &TwCalculator,
        CountryCode::Uk => &UkCalculator,
        CountryCode::De => &DeCalculator,
        CountryCode::Ca => &CaCalculator,
        CountryCode::Ch => &ChCalculator,
    }
}

pub fn country_config(code: CountryCode) -> &'static CountryConfig {
    match code {
        CountryCode::Us => &us::CONFIG,
        CountryCode::Sg => &sg::CONFIG,
        CountryCode::Kr => &kr::CONFIG,
        CountryCode::Nl => &nl::CONFIG,
        CountryCode::Au => &au::CONFIG,
        CountryCode::Pt => &pt::CONFIG,
        CountryCode::Th => &th::CONFIG,
        CountryCode::Hk => &hk::CONFIG,
        CountryCode::Id => &id::CONFIG,
        CountryCode::Tw => &tw::CONFIG,
        CountryCode::Uk => &uk::CONFIG,
        CountryCode::De => &de::CONFIG,
        CountryCode::Ca => &ca::CONFIG,
        CountryCode::Ch => &ch::CONFIG,
    }
}

/// Looks up a country by its (case-insensitive) code.
///
/// ```
/// use salary_core::get_country_config;
///
/// let config = get_country_config("sg").unwrap();
/// assert_eq!(config.currency, "SGD");
/// assert!(get_country_config("FR").is_err());
/// ```
pub fn get_country_config(code: &str) -> Result<&'static CountryConfig, CalculatorError> {
    let code: CountryCode = code.parse()?;
    Ok(country_config(code))
}

pub fn get_default_inputs(code: &str) -> Result<CalculatorInputs, CalculatorError> {
    let code: CountryCode = code.parse()?;
    Ok(CalculatorInputs::default_for(code))
}

/// Every registered country, in a stable order.
pub fn get_supported_countries() -> Vec<&'static CountryConfig> {
    CountryCode::ALL.iter().map(|&code| country_config(code)).collect()
}

/// Limits that apply to `inputs`, for pre-filling or validating elections.
pub fn get_contribution_limits(inputs: &CalculatorInputs) -> ContributionLimits {
    inputs.contribution_limits()
}

/// Normalizes `inputs` and dispatches to the matching calculator.
pub fn calculate_net_salary(
    inputs: &CalculatorInputs,
) -> Result<CalculationResult, CalculatorError> {
    let code = inputs.country();
    let normalized = inputs.clone().normalized();
    debug!(country = %code, gross = %normalized.gross_salary(), "calculating net salary");
    calculator_for(code).calculate(&normalized)
}

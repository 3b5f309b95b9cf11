use thiserror::Error;

use crate::models::CountryCode;

/// Errors surfaced by the registry, the calculators and the comparison engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculatorError {
    /// A country code that no calculator is registered for.
    #[error("unsupported country '{0}'")]
    UnsupportedCountry(String),

    /// A calculator was handed inputs tagged for another country.
    #[error("{expected} calculator received inputs for {actual}")]
    InvalidCountryInput {
        expected: CountryCode,
        actual: CountryCode,
    },
}

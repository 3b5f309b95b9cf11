pub mod calculations;
pub mod comparison;
pub mod countries;
pub mod error;
pub mod fx;
pub mod models;
pub mod registry;

pub use comparison::{
    ComparisonAssumptions, ComparisonInputs, ComparisonOutput, CountryComparison,
    RetirementContributions, SpecialRegimes, compare, compare_with_provider,
};
pub use error::CalculatorError;
pub use fx::{
    FxProviderError, FxRateError, FxRateProvider, FxRatesResponse, StaticFxRateProvider,
};
pub use models::*;
pub use registry::{
    calculate_net_salary, get_contribution_limits, get_country_config, get_default_inputs,
    get_supported_countries,
};

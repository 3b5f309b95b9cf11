mod contribution_limit;
mod country;
mod inputs;
mod marital_status;
mod pay_frequency;
mod result;
mod tax_bracket;

pub use contribution_limit::{ContributionLimit, ContributionLimits, SharedCeiling};
pub use country::{CountryCode, CountryConfig, Region};
pub use inputs::CalculatorInputs;
pub use marital_status::MaritalStatus;
pub use pay_frequency::PayFrequency;
pub use result::{CalculationResult, CountryBreakdown, PerPeriod, TaxItem};
pub use tax_bracket::TaxBracket;

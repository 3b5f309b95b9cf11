//! CSV loader for batch salary requests.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Only
//! `country` and `gross_salary` are required.
//!
//! | Column | Required | Type | Notes |
//! |------------------|----------|---------|---------------------------------------------|
//! | `country` | yes | string | Two-letter code, e.g. `US`, `DE` (`GB` accepted) |
//! | `gross_salary` | yes | decimal | Annual, in local currency |
//! | `pay_frequency` | no | string | `annual`, `monthly`, `biweekly`, `weekly` |
//! | `marital_status` | no | string | `single` (default) or `married` |
//! | `children` | no | integer | Default `0` |
//! | `region` | no | string | State, province, canton or UK region |
//! | `age` | no | integer | Default `30` |
//! | `retirement` | no | string | `none` (default) or `max` |
//!
//! ### Example
//!
//! ```csv
//! country,gross_salary,pay_frequency,marital_status,children,region,age,retirement
//! US,120000,biweekly,married,2,NY,40,max
//! DE,65000,monthly,,,BY,,
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use salary_core::comparison::synthesize;
use salary_core::{
    CalculatorInputs, ComparisonAssumptions, CountryCode, MaritalStatus, PayFrequency,
    RetirementContributions,
};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct CsvRow {
    country: String,
    gross_salary: Decimal,
    pay_frequency: Option<String>,
    marital_status: Option<String>,
    children: Option<u8>,
    region: Option<String>,
    age: Option<u8>,
    retirement: Option<String>,
}

/// Errors that can occur while loading batch requests.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Bad structure, missing required column or a type mismatch.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unsupported country '{value}' on row {row}")]
    InvalidCountry { value: String, row: usize },

    #[error("unrecognised pay frequency '{value}' on row {row}")]
    InvalidFrequency { value: String, row: usize },

    #[error("unrecognised marital status '{value}' on row {row}")]
    InvalidMaritalStatus { value: String, row: usize },

    #[error("unrecognised retirement option '{value}' on row {row}, expected none or max")]
    InvalidRetirement { value: String, row: usize },
}

/// One validated row: the generic answers plus what is needed to turn them
/// into a country's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    /// 1-based, header excluded.
    pub row: usize,
    pub country: CountryCode,
    pub gross_salary: Decimal,
    pub pay_frequency: Option<PayFrequency>,
    pub region: Option<String>,
    pub assumptions: ComparisonAssumptions,
}

impl BatchRequest {
    /// Builds the country's inputs through the comparison-layer synthesis.
    /// Returns the applied assumption notes alongside.
    pub fn to_inputs(&self) -> (CalculatorInputs, Vec<String>) {
        let synthesized = synthesize(self.country, self.gross_salary, &self.assumptions);
        let mut inputs = synthesized.inputs;
        let mut notes = synthesized.assumptions;

        if let Some(frequency) = self.pay_frequency {
            inputs = inputs.with_pay_frequency(frequency);
        }
        // US states already went through the questionnaire.
        if let Some(region) = self.region.as_deref().filter(|_| self.country != CountryCode::Us) {
            if inputs.set_region(region) {
                notes.push(format!("Region: {}", region.to_ascii_uppercase()));
            } else {
                warn!(
                    row = self.row,
                    country = %self.country,
                    region,
                    "region not recognised, using default"
                );
                notes.push(format!("Unknown region '{region}', using default"));
            }
        }
        (inputs, notes)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchRequest, CsvLoadError> {
    let country = CountryCode::parse(&row.country).ok_or_else(|| CsvLoadError::InvalidCountry {
        value: row.country.clone(),
        row: row_number,
    })?;

    let pay_frequency = present(&row.pay_frequency)
        .map(|value| {
            PayFrequency::parse(value).ok_or_else(|| CsvLoadError::InvalidFrequency {
                value: value.to_string(),
                row: row_number,
            })
        })
        .transpose()?;

    let marital_status = match present(&row.marital_status) {
        Some(value) => MaritalStatus::parse(value).ok_or_else(|| {
            CsvLoadError::InvalidMaritalStatus {
                value: value.to_string(),
                row: row_number,
            }
        })?,
        None => MaritalStatus::Single,
    };

    let retirement_contributions = match present(&row.retirement).map(str::to_ascii_lowercase) {
        None => RetirementContributions::None,
        Some(value) if value == "none" => RetirementContributions::None,
        Some(value) if value == "max" => RetirementContributions::Max,
        Some(value) => {
            return Err(CsvLoadError::InvalidRetirement {
                value,
                row: row_number,
            });
        }
    };

    let region = present(&row.region).map(str::to_string);
    let defaults = ComparisonAssumptions::default();
    let assumptions = ComparisonAssumptions {
        marital_status,
        children: row.children.unwrap_or(0),
        age: row.age.unwrap_or(defaults.age),
        retirement_contributions,
        us_state: match (&region, country) {
            (Some(state), CountryCode::Us) => state.clone(),
            _ => defaults.us_state.clone(),
        },
        ..defaults
    };

    Ok(BatchRequest {
        row: row_number,
        country,
        gross_salary: row.gross_salary,
        pay_frequency,
        region,
        assumptions,
    })
}

/// Parses CSV text. Rows are returned in file order.
///
/// # Errors
///
/// [`CsvLoadError::Parse`] for structural problems, otherwise the first
/// row whose values are not recognised.
pub fn load_from_str(input: &str) -> Result<Vec<BatchRequest>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Reads `path` and delegates to [`load_from_str`].
///
/// # Errors
///
/// [`CsvLoadError::Io`] when the file cannot be read, otherwise as
/// [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<BatchRequest>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

//! Command implementations behind the `salary-calc` subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use salary_core::{
    CalculationResult, CalculatorInputs, ComparisonAssumptions, ComparisonInputs,
    ComparisonOutput, CountryCode, FxRateProvider, PayFrequency, calculate_net_salary,
    compare_with_provider, get_country_config, get_default_inputs,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::csv_loader;

/// Options for a single-country calculation. A request file replaces the
/// country defaults; the other fields override whichever was chosen.
#[derive(Debug, Clone, Default)]
pub struct CalculateRequest {
    pub country: Option<String>,
    pub request_file: Option<PathBuf>,
    pub gross_salary: Option<Decimal>,
    pub pay_frequency: Option<PayFrequency>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub row: usize,
    pub assumptions: Vec<String>,
    pub result: CalculationResult,
}

/// Reads JSON when the extension is `.json`, TOML otherwise.
fn read_structured<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in '{}'", path.display()))
    } else {
        toml::from_str(&text).with_context(|| format!("invalid TOML in '{}'", path.display()))
    }
}

/// Loads a tagged `CalculatorInputs` (`country = "DE"` plus that country's
/// fields).
pub fn load_request(path: &Path) -> Result<CalculatorInputs> {
    read_structured(path)
}

pub fn load_assumptions(path: &Path) -> Result<ComparisonAssumptions> {
    read_structured(path)
}

/// Resolves the inputs a calculation will run on.
pub fn build_inputs(request: &CalculateRequest) -> Result<CalculatorInputs> {
    let mut inputs = match (&request.request_file, &request.country) {
        (Some(path), country) => {
            let inputs = load_request(path)?;
            if let Some(country) = country {
                let expected: CountryCode = country.parse()?;
                if expected != inputs.country() {
                    bail!(
                        "request file '{}' is for {}, not {expected}",
                        path.display(),
                        inputs.country()
                    );
                }
            }
            inputs
        }
        (None, Some(country)) => get_default_inputs(country)?,
        (None, None) => bail!("either --country or --request is required"),
    };

    if let Some(gross) = request.gross_salary {
        inputs = inputs.with_gross_salary(gross);
    }
    if let Some(frequency) = request.pay_frequency {
        inputs = inputs.with_pay_frequency(frequency);
    }
    if let Some(region) = &request.region {
        if !inputs.set_region(region) {
            let config = get_country_config(inputs.country().as_str())?;
            let known: Vec<&str> = config.regions.iter().map(|r| r.code).collect();
            if known.is_empty() {
                bail!("{} has no regions", config.name);
            }
            bail!(
                "unknown region '{region}' for {}; expected one of {}",
                config.name,
                known.join(", ")
            );
        }
    }
    Ok(inputs)
}

pub fn calculate(request: &CalculateRequest) -> Result<CalculationResult> {
    let inputs = build_inputs(request)?;
    let result = calculate_net_salary(&inputs)?;
    info!(
        country = %result.country,
        gross = %result.gross_salary,
        net = %result.net_salary,
        "calculation complete"
    );
    Ok(result)
}

/// Runs the comparison. Without a provider the output is not ready.
pub async fn compare(
    inputs: &ComparisonInputs,
    provider: Option<&dyn FxRateProvider>,
) -> Result<ComparisonOutput> {
    let output = match provider {
        Some(provider) => compare_with_provider(inputs, provider).await?,
        None => {
            warn!("no exchange-rate file configured; comparison not ready");
            salary_core::compare(inputs, None)?
        }
    };
    info!(
        ready = output.is_ready,
        countries = output.results.len(),
        base = %output.base_currency,
        "comparison complete"
    );
    Ok(output)
}

/// Calculates every row of a batch file. A failing row aborts the batch.
pub fn run_batch(path: &Path) -> Result<Vec<BatchOutcome>> {
    let requests = csv_loader::load_from_file(path)?;
    let outcomes = requests
        .iter()
        .map(|request| {
            let (inputs, assumptions) = request.to_inputs();
            let result = calculate_net_salary(&inputs)
                .with_context(|| format!("row {} ({})", request.row, request.country))?;
            Ok(BatchOutcome {
                row: request.row,
                assumptions,
                result,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    info!(rows = outcomes.len(), path = %path.display(), "batch complete");
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_with_overrides() {
        let request = CalculateRequest {
            country: Some("ch".to_string()),
            gross_salary: Some(dec!(150_000)),
            pay_frequency: Some(PayFrequency::Monthly),
            region: Some("zg".to_string()),
            ..CalculateRequest::default()
        };

        let inputs = build_inputs(&request).unwrap();

        assert_eq!(inputs.country(), CountryCode::Ch);
        assert_eq!(inputs.gross_salary(), dec!(150_000));
        assert_eq!(inputs.pay_frequency(), PayFrequency::Monthly);
        assert_eq!(inputs.region(), Some("ZG".to_string()));
    }

    #[test]
    fn country_or_request_is_required() {
        let err = build_inputs(&CalculateRequest::default()).unwrap_err();

        assert_eq!(err.to_string(), "either --country or --request is required");
    }

    #[test]
    fn unknown_region_lists_known_ones() {
        let request = CalculateRequest {
            country: Some("CA".to_string()),
            region: Some("QC".to_string()),
            ..CalculateRequest::default()
        };

        let err = build_inputs(&request).unwrap_err();

        assert_eq!(
            err.to_string(),
            "unknown region 'QC' for Canada; expected one of AB, BC, ON"
        );
    }

    #[test]
    fn region_on_a_country_without_regions() {
        let request = CalculateRequest {
            country: Some("SG".to_string()),
            region: Some("North".to_string()),
            ..CalculateRequest::default()
        };

        let err = build_inputs(&request).unwrap_err();

        assert_eq!(err.to_string(), "Singapore has no regions");
    }

    #[test]
    fn unknown_country_is_an_error() {
        let request = CalculateRequest {
            country: Some("FR".to_string()),
            ..CalculateRequest::default()
        };

        assert!(calculate(&request).is_err());
    }

    #[tokio::test]
    async fn compare_without_provider_is_not_ready() {
        let output = compare(&ComparisonInputs::default(), None).await.unwrap();

        assert!(!output.is_ready);
        assert_eq!(output.base_currency, "USD");
    }
}

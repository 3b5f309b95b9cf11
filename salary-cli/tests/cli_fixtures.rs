//! Integration tests that exercise the loaders and commands against on-disk
//! fixture files.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use salary_cli::app::{self, CalculateRequest};
use salary_cli::fx_file::FileFxRateProvider;
use salary_cli::{AppConfig, OutputFormat, csv_loader, report};
use salary_core::{
    ComparisonInputs, CountryCode, FxRateProvider, MaritalStatus, RetirementContributions,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn config_fixture_loads() {
    let config = AppConfig::load(Some(&fixture("config.toml"))).unwrap();

    assert_eq!(config.base_currency, "EUR");
    assert_eq!(config.rates_file, Some(PathBuf::from("rates.json")));
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(config.max_rate_age_hours, 48);
}

#[test]
fn batch_fixture_parses_every_row() {
    let requests = csv_loader::load_from_file(&fixture("batch.csv")).unwrap();

    assert_eq!(requests.len(), 5);
    assert_eq!(requests[2].country, CountryCode::Uk);
    assert_eq!(requests[4].assumptions.children, 4);
}

#[test]
fn batch_fixture_calculates_every_row() {
    let outcomes = app::run_batch(&fixture("batch.csv")).unwrap();

    assert_eq!(outcomes.len(), 5);
    for outcome in &outcomes {
        let r = &outcome.result;
        assert_eq!(r.net_salary + r.total_deductions, r.gross_salary, "row {}", outcome.row);
    }
    assert!(
        outcomes[4]
            .assumptions
            .contains(&"Dependents capped at 3".to_string())
    );
}

#[test]
fn batch_csv_report_has_a_line_per_row() {
    let outcomes = app::run_batch(&fixture("batch.csv")).unwrap();

    let csv = report::batch(&outcomes, OutputFormat::Csv).unwrap();

    assert_eq!(csv.lines().count(), outcomes.len() + 1);
    assert!(csv.starts_with("row,country,currency,gross_salary"));
}

#[test]
fn toml_request_sets_country_fields() {
    let request = CalculateRequest {
        request_file: Some(fixture("request_de.toml")),
        ..CalculateRequest::default()
    };

    let result = app::calculate(&request).unwrap();

    assert_eq!(result.country, CountryCode::De);
    assert_eq!(result.gross_salary, dec!(60000));
    assert!(result.tax_amount("Kirchensteuer") > Decimal::ZERO);
}

#[test]
fn json_request_with_gross_override() {
    let request = CalculateRequest {
        country: Some("us".to_string()),
        request_file: Some(fixture("request_us.json")),
        gross_salary: Some(dec!(90000)),
        ..CalculateRequest::default()
    };

    let result = app::calculate(&request).unwrap();

    assert_eq!(result.gross_salary, dec!(90000));
    assert_eq!(result.tax_amount("State income tax"), Decimal::ZERO);
}

#[test]
fn request_for_another_country_is_rejected() {
    let request = CalculateRequest {
        country: Some("UK".to_string()),
        request_file: Some(fixture("request_de.toml")),
        ..CalculateRequest::default()
    };

    let err = app::calculate(&request).unwrap_err();

    assert!(err.to_string().contains("is for DE, not UK"));
}

#[test]
fn assumptions_fixture_loads() {
    let assumptions = app::load_assumptions(&fixture("assumptions.toml")).unwrap();

    assert_eq!(assumptions.marital_status, MaritalStatus::Married);
    assert_eq!(assumptions.children, 2);
    assert_eq!(assumptions.baseline_country, Some(CountryCode::De));
    assert_eq!(assumptions.retirement_contributions, RetirementContributions::Max);
    assert_eq!(assumptions.us_state, "WA");
    assert!(assumptions.special_regimes.nl_thirty_percent_ruling);
    assert!(assumptions.resident);
}

#[tokio::test]
async fn compare_with_rate_file_skips_unquoted_currencies() {
    let provider = FileFxRateProvider::new(fixture("rates.json")).with_max_age_hours(1);
    let inputs = ComparisonInputs {
        base_salary: dec!(100_000),
        base_currency: "EUR".to_string(),
        assumptions: app::load_assumptions(&fixture("assumptions.toml")).unwrap(),
    };

    let output = app::compare(&inputs, Some(&provider as &dyn FxRateProvider))
        .await
        .unwrap();

    assert!(output.is_ready);
    // TWD is not quoted in the snapshot.
    assert_eq!(output.results.len(), CountryCode::ALL.len() - 1);
    assert!(output.baseline(CountryCode::Tw).is_none());
    let de = output.baseline(CountryCode::De).unwrap();
    assert_eq!(de.gross_local, dec!(100_000));
    assert_eq!(de.delta_base, Decimal::ZERO);
}

#[tokio::test]
async fn comparison_csv_is_ranked() {
    let provider = FileFxRateProvider::new(fixture("rates.json"));
    let inputs = ComparisonInputs {
        base_salary: dec!(75_000),
        ..ComparisonInputs::default()
    };

    let output = app::compare(&inputs, Some(&provider as &dyn FxRateProvider))
        .await
        .unwrap();
    let csv = report::comparison(&output, OutputFormat::Csv).unwrap();

    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("rank,country,currency,rate"));
    assert!(lines.next().unwrap().starts_with("1,"));
}

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::synthesis::synthesize;
use super::{ComparisonInputs, ComparisonOutput, CountryComparison};
use crate::calculations::common::{non_negative, ratio, round_half_up};
use crate::error::CalculatorError;
use crate::fx::{FxRateProvider, FxRatesResponse};
use crate::models::{CountryCode, CountryConfig};
use crate::registry::{calculate_net_salary, country_config};

/// Ranks every registered country for one base salary.
///
/// Without rates the output is not ready and empty. A country whose currency
/// has no usable rate is left out of `results`.
///
/// # Errors
///
/// Propagates a calculator failure, which aborts the whole comparison.
pub fn compare(
    inputs: &ComparisonInputs,
    fx_rates: Option<&FxRatesResponse>,
) -> Result<ComparisonOutput, CalculatorError> {
    let base_currency = normalized_base(inputs);
    let Some(rates) = fx_rates else {
        return Ok(ComparisonOutput::not_ready(base_currency));
    };

    let mut results = Vec::with_capacity(CountryCode::ALL.len());
    for code in CountryCode::ALL {
        let config = country_config(code);
        let rate = match rates.cross_rate(&base_currency, config.currency) {
            Ok(rate) => rate,
            Err(error) => {
                debug!(country = %code, %error, "skipping country without a usable exchange rate");
                continue;
            }
        };
        results.push(compare_country(inputs, config, rate)?);
    }

    results.sort_by(|a, b| b.net_base.cmp(&a.net_base));
    apply_baseline(&mut results, inputs.assumptions.baseline_country);

    Ok(ComparisonOutput {
        is_ready: true,
        base_currency,
        rates_updated_at: Some(rates.updated_at),
        results,
    })
}

/// Fetches rates for the base currency, then compares. A provider failure
/// yields a not-ready output rather than an error.
///
/// # Errors
///
/// Same as [`compare`].
pub async fn compare_with_provider(
    inputs: &ComparisonInputs,
    provider: &dyn FxRateProvider,
) -> Result<ComparisonOutput, CalculatorError> {
    let base = normalized_base(inputs);
    let rates = match provider.latest_rates(&base).await {
        Ok(rates) => Some(rates),
        Err(error) => {
            warn!(%base, %error, "exchange rates unavailable");
            None
        }
    };
    compare(inputs, rates.as_ref())
}

fn normalized_base(inputs: &ComparisonInputs) -> String {
    inputs.base_currency.trim().to_ascii_uppercase()
}

fn compare_country(
    inputs: &ComparisonInputs,
    config: &'static CountryConfig,
    rate: Decimal,
) -> Result<CountryComparison, CalculatorError> {
    let gross_local = round_half_up(non_negative(inputs.base_salary) * rate);
    let synthesized = synthesize(config.code, gross_local, &inputs.assumptions);
    let calculation = calculate_net_salary(&synthesized.inputs)?;

    let net_local = calculation.net_salary;
    Ok(CountryComparison {
        country: config.code,
        name: config.name.to_string(),
        currency: config.currency.to_string(),
        rate,
        gross_local,
        net_local,
        net_base: net_local / rate,
        take_home_rate: ratio(net_local, gross_local),
        effective_tax_rate: calculation.effective_tax_rate,
        delta_base: Decimal::ZERO,
        delta_percent: Decimal::ZERO,
        assumptions: synthesized.assumptions,
        calculation,
    })
}

fn apply_baseline(
    results: &mut [CountryComparison],
    baseline: Option<CountryCode>,
) {
    let Some(baseline_net) = baseline
        .and_then(|code| results.iter().find(|row| row.country == code))
        .map(|row| row.net_base)
    else {
        return;
    };
    for row in results {
        row.delta_base = row.net_base - baseline_net;
        row.delta_percent = ratio(row.delta_base, baseline_net);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::comparison::ComparisonAssumptions;
    use crate::fx::{FxProviderError, StaticFxRateProvider};
    use crate::models::MaritalStatus;

    fn rates() -> FxRatesResponse {
        let quotes = [
            ("SGD", dec!(1.35)),
            ("KRW", dec!(1380)),
            ("EUR", dec!(0.92)),
            ("AUD", dec!(1.52)),
            ("THB", dec!(36)),
            ("HKD", dec!(7.8)),
            ("IDR", dec!(16300)),
            ("TWD", dec!(32)),
            ("GBP", dec!(0.79)),
            ("CAD", dec!(1.37)),
            ("CHF", dec!(0.88)),
        ];
        FxRatesResponse::new(
            "USD",
            quotes
                .into_iter()
                .map(|(code, rate)| (code.to_string(), rate))
                .collect::<BTreeMap<_, _>>(),
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        )
        .with_base_present()
    }

    fn inputs(baseline: Option<CountryCode>) -> ComparisonInputs {
        ComparisonInputs {
            base_salary: dec!(100_000),
            base_currency: "usd".to_string(),
            assumptions: ComparisonAssumptions {
                baseline_country: baseline,
                ..ComparisonAssumptions::default()
            },
        }
    }

    fn row(
        output: &ComparisonOutput,
        code: CountryCode,
    ) -> &CountryComparison {
        output
            .results
            .iter()
            .find(|r| r.country == code)
            .unwrap_or_else(|| panic!("no row for {code}"))
    }

    #[test]
    fn no_rates_means_not_ready() {
        let output = compare(&inputs(None), None).unwrap();

        assert!(!output.is_ready);
        assert_eq!(output.base_currency, "USD");
        assert!(output.results.is_empty());
        assert_eq!(output.rates_updated_at, None);
    }

    #[test]
    fn every_country_with_a_rate_is_ranked() {
        let output = compare(&inputs(None), Some(&rates())).unwrap();

        assert!(output.is_ready);
        assert_eq!(output.results.len(), CountryCode::ALL.len());
        assert!(
            output
                .results
                .windows(2)
                .all(|pair| pair[0].net_base >= pair[1].net_base)
        );
    }

    #[test]
    fn missing_rate_drops_only_that_country() {
        let mut fx = rates();
        fx.rates.remove("SGD");
        fx.rates.insert("THB".to_string(), dec!(-1));

        let output = compare(&inputs(Some(CountryCode::Us)), Some(&fx)).unwrap();

        assert!(output.is_ready);
        assert_eq!(output.results.len(), CountryCode::ALL.len() - 2);
        assert!(
            output
                .results
                .iter()
                .all(|r| r.country != CountryCode::Sg && r.country != CountryCode::Th)
        );
    }

    #[test]
    fn baseline_row_has_zero_delta() {
        let output = compare(&inputs(Some(CountryCode::Us)), Some(&rates())).unwrap();

        let us = row(&output, CountryCode::Us);
        assert_eq!(us.delta_base, Decimal::ZERO);
        assert_eq!(us.delta_percent, Decimal::ZERO);

        let de = row(&output, CountryCode::De);
        assert_eq!(de.delta_base, de.net_base - us.net_base);
        assert_eq!(de.delta_percent, de.delta_base / us.net_base);
    }

    #[test]
    fn absent_baseline_leaves_deltas_at_zero() {
        let mut fx = rates();
        fx.rates.remove("GBP");

        let output = compare(&inputs(Some(CountryCode::Uk)), Some(&fx)).unwrap();

        assert!(output.results.iter().all(|r| r.delta_base == Decimal::ZERO));
    }

    #[test]
    fn rows_convert_through_the_rate() {
        let output = compare(&inputs(None), Some(&rates())).unwrap();

        let us = row(&output, CountryCode::Us);
        assert_eq!(us.rate, dec!(1));
        assert_eq!(us.gross_local, dec!(100_000));
        assert_eq!(us.net_base, us.net_local);

        let hk = row(&output, CountryCode::Hk);
        assert_eq!(hk.gross_local, dec!(780_000));
        assert_eq!(hk.net_base, hk.net_local / dec!(7.8));
        assert_eq!(hk.take_home_rate, hk.net_local / dec!(780_000));
        assert_eq!(hk.calculation.gross_salary, dec!(780_000));
    }

    #[test]
    fn questionnaire_base_other_than_provider_base() {
        let eur = ComparisonInputs {
            base_currency: "EUR".to_string(),
            ..inputs(None)
        };

        let output = compare(&eur, Some(&rates())).unwrap();

        assert_eq!(output.base_currency, "EUR");
        let de = row(&output, CountryCode::De);
        assert_eq!(de.rate, dec!(1));
        assert_eq!(de.gross_local, dec!(100_000));
    }

    #[test]
    fn zero_salary_gives_zero_take_home_rate() {
        let broke = ComparisonInputs {
            base_salary: Decimal::ZERO,
            ..inputs(Some(CountryCode::Us))
        };

        let output = compare(&broke, Some(&rates())).unwrap();

        assert!(output.results.iter().all(|r| r.take_home_rate == Decimal::ZERO));
        assert!(output.results.iter().all(|r| r.delta_percent == Decimal::ZERO));
    }

    #[test]
    fn assumptions_travel_with_each_row() {
        let mut married = inputs(None);
        married.assumptions.marital_status = MaritalStatus::Married;

        let output = compare(&married, Some(&rates())).unwrap();

        assert!(
            row(&output, CountryCode::Us)
                .assumptions
                .contains(&"Married filing jointly".to_string())
        );
    }

    struct DownProvider;

    #[async_trait]
    impl FxRateProvider for DownProvider {
        async fn latest_rates(
            &self,
            _base: &str,
        ) -> Result<FxRatesResponse, FxProviderError> {
            Err(FxProviderError::Unavailable("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn provider_failure_is_not_ready() {
        let output = compare_with_provider(&inputs(None), &DownProvider)
            .await
            .unwrap();

        assert!(!output.is_ready);
        assert!(output.results.is_empty());
    }

    #[tokio::test]
    async fn provider_rates_feed_the_comparison() {
        let provider = StaticFxRateProvider::new(rates());

        let output = compare_with_provider(&inputs(Some(CountryCode::Us)), &provider)
            .await
            .unwrap();

        assert!(output.is_ready);
        assert_eq!(output.results.len(), CountryCode::ALL.len());
    }

    #[tokio::test]
    async fn provider_is_asked_for_the_trimmed_uppercase_base() {
        let provider = StaticFxRateProvider::new(rates());
        let padded = ComparisonInputs {
            base_currency: " usd ".to_string(),
            ..inputs(None)
        };

        let output = compare_with_provider(&padded, &provider).await.unwrap();

        assert!(output.is_ready);
        assert_eq!(output.base_currency, "USD");
        assert_eq!(row(&output, CountryCode::Us).rate, dec!(1));
    }
}

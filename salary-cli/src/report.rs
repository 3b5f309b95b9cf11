//! Renders core results as text tables, JSON or CSV.

use std::fmt::{self, Write as _};

use rust_decimal::Decimal;
use salary_core::{CalculationResult, ComparisonOutput, CountryConfig};
use serde::Serialize;
use thiserror::Error;

use crate::app::BatchOutcome;
use crate::config::OutputFormat;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer flush failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("text formatting failed")]
    Fmt(#[from] fmt::Error),
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn percent(rate: Decimal) -> String {
    format!("{:.1}%", (rate * Decimal::ONE_HUNDRED).round_dp(1))
}

fn to_csv<R: Serialize>(rows: impl IntoIterator<Item = R>) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ReportError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

// ---------------------------------------------------------------------------
// countries
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CountryRow<'a> {
    code: &'a str,
    name: &'a str,
    currency: &'a str,
    tax_year: &'a str,
    last_updated: &'a str,
    regions: String,
}

pub fn countries(
    configs: &[&CountryConfig],
    format: OutputFormat,
) -> Result<String, ReportError> {
    match format {
        OutputFormat::Json => to_json(configs),
        OutputFormat::Csv => to_csv(configs.iter().map(|c| CountryRow {
            code: c.code.as_str(),
            name: c.name,
            currency: c.currency,
            tax_year: c.tax_year,
            last_updated: c.last_updated,
            regions: c.regions.iter().map(|r| r.code).collect::<Vec<_>>().join(";"),
        })),
        OutputFormat::Text => Ok(countries_text(configs)?),
    }
}

fn countries_text(configs: &[&CountryConfig]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{:<4} {:<16} {:<4} {:<10} Regions", "Code", "Country", "Cur", "Tax year")?;
    for c in configs {
        let regions = match c.regions.len() {
            0 => "-".to_string(),
            n => format!("{n} (default {})", c.default_region.unwrap_or("-")),
        };
        writeln!(
            out,
            "{:<4} {:<16} {:<4} {:<10} {regions}",
            c.code.as_str(),
            c.name,
            c.currency,
            c.tax_year
        )?;
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// single calculation
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ItemRow<'a> {
    kind: &'a str,
    name: &'a str,
    amount: Decimal,
}

pub fn calculation(
    result: &CalculationResult,
    format: OutputFormat,
) -> Result<String, ReportError> {
    match format {
        OutputFormat::Json => to_json(result),
        OutputFormat::Csv => {
            let items = result
                .taxes
                .iter()
                .map(|t| ItemRow {
                    kind: "tax",
                    name: &t.name,
                    amount: t.amount,
                })
                .chain(result.contributions.iter().map(|t| ItemRow {
                    kind: "contribution",
                    name: &t.name,
                    amount: t.amount,
                }))
                .chain([
                    ItemRow {
                        kind: "total",
                        name: "Gross salary",
                        amount: result.gross_salary,
                    },
                    ItemRow {
                        kind: "total",
                        name: "Total tax",
                        amount: result.total_tax,
                    },
                    ItemRow {
                        kind: "total",
                        name: "Total deductions",
                        amount: result.total_deductions,
                    },
                    ItemRow {
                        kind: "total",
                        name: "Net salary",
                        amount: result.net_salary,
                    },
                ]);
            to_csv(items)
        }
        OutputFormat::Text => Ok(calculation_text(result)?),
    }
}

fn calculation_text(result: &CalculationResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} ({})", result.country, result.currency)?;
    let mut line = |label: &str, value: String| writeln!(out, "  {label:<34} {value:>16}");

    line("Gross salary", money(result.gross_salary))?;
    line("Taxable income", money(result.taxable_income))?;
    for item in result.taxes.iter().chain(&result.contributions) {
        line(&item.name, money(-item.amount))?;
    }
    line("Net salary", money(result.net_salary))?;
    line(
        &format!("Net per period ({})", result.per_period.frequency),
        money(result.per_period.net),
    )?;
    line("Effective tax rate", percent(result.effective_tax_rate))?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// comparison
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ComparisonRow<'a> {
    rank: usize,
    country: &'a str,
    currency: &'a str,
    rate: Decimal,
    gross_local: Decimal,
    net_local: Decimal,
    net_base: Decimal,
    take_home_rate: Decimal,
    effective_tax_rate: Decimal,
    delta_base: Decimal,
    delta_percent: Decimal,
}

pub fn comparison(
    output: &ComparisonOutput,
    format: OutputFormat,
) -> Result<String, ReportError> {
    match format {
        OutputFormat::Json => to_json(output),
        OutputFormat::Csv => {
            let rows = output.results.iter().enumerate().map(|(i, r)| ComparisonRow {
                rank: i + 1,
                country: r.country.as_str(),
                currency: &r.currency,
                rate: r.rate,
                gross_local: r.gross_local,
                net_local: r.net_local,
                net_base: r.net_base.round_dp(2),
                take_home_rate: r.take_home_rate,
                effective_tax_rate: r.effective_tax_rate,
                delta_base: r.delta_base.round_dp(2),
                delta_percent: r.delta_percent,
            });
            to_csv(rows)
        }
        OutputFormat::Text => Ok(comparison_text(output)?),
    }
}

fn comparison_text(output: &ComparisonOutput) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if !output.is_ready {
        writeln!(out, "Exchange rates unavailable; comparison not ready.")?;
        return Ok(out);
    }
    if let Some(updated) = output.rates_updated_at {
        writeln!(out, "Rates as of {}", updated.format("%Y-%m-%d %H:%M UTC"))?;
    }
    let base = &output.base_currency;
    writeln!(
        out,
        "{:>2} {:<16} {:>16} {:>14} {:>7} {:>14}",
        "#",
        "Country",
        "Net (local)",
        format!("Net ({base})"),
        "Keep",
        format!("Delta ({base})")
    )?;
    for (i, r) in output.results.iter().enumerate() {
        writeln!(
            out,
            "{:>2} {:<16} {:>16} {:>14} {:>7} {:>14}",
            i + 1,
            r.name,
            format!("{} {}", money(r.net_local), r.currency),
            money(r.net_base),
            percent(r.take_home_rate),
            money(r.delta_base)
        )?;
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// batch
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct BatchRow<'a> {
    row: usize,
    country: &'a str,
    currency: &'a str,
    gross_salary: Decimal,
    total_tax: Decimal,
    total_deductions: Decimal,
    net_salary: Decimal,
    effective_tax_rate: Decimal,
    assumptions: String,
}

pub fn batch(
    outcomes: &[BatchOutcome],
    format: OutputFormat,
) -> Result<String, ReportError> {
    match format {
        OutputFormat::Json => to_json(outcomes),
        OutputFormat::Csv => to_csv(outcomes.iter().map(|o| BatchRow {
            row: o.row,
            country: o.result.country.as_str(),
            currency: &o.result.currency,
            gross_salary: o.result.gross_salary,
            total_tax: o.result.total_tax,
            total_deductions: o.result.total_deductions,
            net_salary: o.result.net_salary,
            effective_tax_rate: o.result.effective_tax_rate,
            assumptions: o.assumptions.join("; "),
        })),
        OutputFormat::Text => Ok(batch_text(outcomes)?),
    }
}

fn batch_text(outcomes: &[BatchOutcome]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{:>4} {:<3} {:>16} {:>16} {:>16} {:>7}",
        "Row", "CC", "Gross", "Tax", "Net", "Rate"
    )?;
    for o in outcomes {
        let r = &o.result;
        writeln!(
            out,
            "{:>4} {:<3} {:>16} {:>16} {:>16} {:>7}",
            o.row,
            r.country.as_str(),
            money(r.gross_salary),
            money(r.total_tax),
            money(r.net_salary),
            percent(r.effective_tax_rate)
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use salary_core::{
        ComparisonInputs, FxRatesResponse, calculate_net_salary, compare, get_default_inputs,
        get_supported_countries,
    };

    use super::*;

    fn us_result() -> CalculationResult {
        let inputs = get_default_inputs("US").unwrap().with_gross_salary(dec!(100_000));
        calculate_net_salary(&inputs).unwrap()
    }

    #[test]
    fn money_and_percent_formatting() {
        assert_eq!(money(dec!(1234.5)), "1234.50");
        assert_eq!(percent(dec!(0.23456)), "23.5%");
    }

    #[test]
    fn countries_csv_has_one_row_per_country() {
        let configs = get_supported_countries();

        let csv = countries(&configs, OutputFormat::Csv).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("code,name,currency,tax_year,last_updated,regions"));
        assert_eq!(lines.count(), configs.len());
    }

    #[test]
    fn calculation_text_lists_items_and_net() {
        let result = us_result();

        let text = calculation(&result, OutputFormat::Text).unwrap();

        assert!(text.starts_with("US (USD)\n"));
        assert!(text.contains("Social Security"));
        assert!(text.contains(&money(result.net_salary)));
    }

    #[test]
    fn calculation_csv_ends_with_totals() {
        let result = us_result();

        let csv = calculation(&result, OutputFormat::Csv).unwrap();

        let last = csv.lines().last().unwrap();
        assert_eq!(last, format!("total,Net salary,{}", result.net_salary));
    }

    #[test]
    fn calculation_json_round_trips() {
        let result = us_result();

        let json = calculation(&result, OutputFormat::Json).unwrap();

        let back: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn not_ready_comparison_says_so() {
        let output = ComparisonOutput::not_ready("USD");

        assert_eq!(
            comparison(&output, OutputFormat::Text).unwrap(),
            "Exchange rates unavailable; comparison not ready.\n"
        );
        assert_eq!(comparison(&output, OutputFormat::Csv).unwrap(), "");
    }

    #[test]
    fn comparison_reports_base_amounts_in_cents() {
        let rates = FxRatesResponse::new(
            "USD",
            BTreeMap::from([("HKD".to_string(), dec!(7.8))]),
            Utc::now(),
        )
        .with_base_present();
        let output = compare(&ComparisonInputs::default(), Some(&rates)).unwrap();

        let csv = comparison(&output, OutputFormat::Csv).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let net_base: Vec<String> = reader
            .records()
            .map(|record| record.unwrap()[6].to_string())
            .collect();
        assert_eq!(net_base.len(), 2);
        assert!(
            net_base
                .iter()
                .all(|amount| amount.split('.').nth(1).is_none_or(|cents| cents.len() <= 2)),
            "{net_base:?}"
        );

        let text = comparison(&output, OutputFormat::Text).unwrap();
        assert!(text.contains("Hong Kong"));
        assert!(text.contains(&money(output.results[0].net_base)));
    }
}

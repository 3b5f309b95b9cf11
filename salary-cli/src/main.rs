use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use salary_core::{
    ComparisonInputs, CountryCode, FxRateProvider, PayFrequency, RetirementContributions,
    get_supported_countries,
};
use tracing::debug;

use salary_cli::app::{self, CalculateRequest};
use salary_cli::fx_file::FileFxRateProvider;
use salary_cli::{AppConfig, OutputFormat, logging, report};

/// Take-home pay across fourteen jurisdictions.
#[derive(Debug, Parser)]
#[command(name = "salary-calc", version)]
struct Cli {
    /// TOML settings file. Defaults to ./salary-calc.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `salary_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List supported countries.
    Countries,

    /// Net salary for one country.
    Calculate {
        #[arg(long)]
        country: Option<String>,

        /// TOML or JSON file holding tagged inputs.
        #[arg(long)]
        request: Option<PathBuf>,

        /// Annual gross in local currency.
        #[arg(long)]
        gross: Option<Decimal>,

        #[arg(long, value_parser = parse_frequency)]
        frequency: Option<PayFrequency>,

        #[arg(long)]
        region: Option<String>,
    },

    /// Rank every country for one base salary.
    Compare {
        #[arg(long)]
        salary: Decimal,

        /// Base currency; defaults to the configured one.
        #[arg(long)]
        currency: Option<String>,

        /// TOML or JSON questionnaire answers.
        #[arg(long)]
        assumptions: Option<PathBuf>,

        /// JSON rate snapshot; defaults to the configured one.
        #[arg(long)]
        rates: Option<PathBuf>,

        #[arg(long)]
        baseline: Option<CountryCode>,

        /// Fill retirement elections to their limits.
        #[arg(long)]
        max_retirement: bool,
    },

    /// Calculate every row of a CSV file.
    Batch {
        #[arg(long)]
        file: PathBuf,
    },
}

fn parse_frequency(value: &str) -> Result<PayFrequency, String> {
    PayFrequency::parse(value)
        .ok_or_else(|| format!("'{value}' is not one of annual, monthly, biweekly, weekly"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log = logging::init(logging::resolve_filter(cli.log_level.as_deref(), "info")?)?;
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if cli.log_level.is_none() && std::env::var_os("RUST_LOG").is_none() {
        log.set_level(&config.log_level)?;
    }
    if let Some(path) = &config.log_file {
        log.log_to_file(path)?;
    }
    debug!(?config, "configuration loaded");

    let format = cli.output.unwrap_or(config.output);
    let rendered = match cli.command {
        Command::Countries => report::countries(&get_supported_countries(), format)?,
        Command::Calculate {
            country,
            request,
            gross,
            frequency,
            region,
        } => {
            let request = CalculateRequest {
                country,
                request_file: request,
                gross_salary: gross,
                pay_frequency: frequency,
                region,
            };
            report::calculation(&app::calculate(&request)?, format)?
        }
        Command::Compare {
            salary,
            currency,
            assumptions,
            rates,
            baseline,
            max_retirement,
        } => {
            let mut inputs = ComparisonInputs {
                base_salary: salary,
                base_currency: currency.unwrap_or_else(|| config.base_currency.clone()),
                ..ComparisonInputs::default()
            };
            if let Some(path) = assumptions {
                inputs.assumptions = app::load_assumptions(&path)?;
            }
            if baseline.is_some() {
                inputs.assumptions.baseline_country = baseline;
            }
            if max_retirement {
                inputs.assumptions.retirement_contributions = RetirementContributions::Max;
            }
            let provider = rates
                .or_else(|| config.rates_file.clone())
                .map(|path| {
                    FileFxRateProvider::new(path).with_max_age_hours(config.max_rate_age_hours)
                });
            let provider = provider.as_ref().map(|p| p as &dyn FxRateProvider);
            let output = app::compare(&inputs, provider).await?;
            report::comparison(&output, format)?
        }
        Command::Batch { file } => report::batch(&app::run_batch(&file)?, format)?,
    };

    print!("{rendered}");
    Ok(())
}

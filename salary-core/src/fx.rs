//! Foreign-exchange rates consumed by the comparison engine.
//!
//! Rates are quoted as units of currency per one unit of `base`. The engine
//! never fetches rates itself; an [`FxRateProvider`] hands it an
//! already-resolved [`FxRatesResponse`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rates older than this are treated as stale.
pub const MAX_RATE_AGE_HOURS: i64 = 12;

/// A rate that cannot be used for conversion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FxRateError {
    #[error("no exchange rate for {0}")]
    MissingRate(String),

    #[error("exchange rate for {currency} must be positive, got {rate}")]
    NonPositiveRate { currency: String, rate: Decimal },
}

/// Failure of the collaborator that supplies rates.
#[derive(Debug, Error)]
pub enum FxProviderError {
    #[error("rate provider unavailable: {0}")]
    Unavailable(String),

    #[error("malformed rate data: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxRatesResponse {
    pub base: String,
    pub rates: BTreeMap<String, Decimal>,
    pub updated_at: DateTime<Utc>,
}

impl FxRatesResponse {
    pub fn new(
        base: impl Into<String>,
        rates: BTreeMap<String, Decimal>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            base: base.into().to_ascii_uppercase(),
            rates,
            updated_at,
        }
    }

    /// Units of `quote` per unit of the response base.
    pub fn rate_for(
        &self,
        quote: &str,
    ) -> Result<Decimal, FxRateError> {
        if quote.eq_ignore_ascii_case(&self.base) {
            return Ok(Decimal::ONE);
        }
        let rate = self
            .rates
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(quote))
            .map(|(_, rate)| *rate)
            .ok_or_else(|| FxRateError::MissingRate(quote.to_string()))?;
        if rate <= Decimal::ZERO {
            return Err(FxRateError::NonPositiveRate {
                currency: quote.to_string(),
                rate,
            });
        }
        Ok(rate)
    }

    /// Units of `quote` per unit of `base`, rebasing through the response
    /// base when the two differ.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use chrono::Utc;
    /// use rust_decimal_macros::dec;
    /// use salary_core::FxRatesResponse;
    ///
    /// let rates = BTreeMap::from([
    ///     ("EUR".to_string(), dec!(0.5)),
    ///     ("GBP".to_string(), dec!(0.25)),
    /// ]);
    /// let fx = FxRatesResponse::new("USD", rates, Utc::now());
    ///
    /// assert_eq!(fx.cross_rate("EUR", "GBP").unwrap(), dec!(0.5));
    /// assert_eq!(fx.cross_rate("EUR", "USD").unwrap(), dec!(2));
    /// ```
    pub fn cross_rate(
        &self,
        base: &str,
        quote: &str,
    ) -> Result<Decimal, FxRateError> {
        let base_rate = self.rate_for(base)?;
        let quote_rate = self.rate_for(quote)?;
        Ok(quote_rate / base_rate)
    }

    /// Whether the rates may still be served from cache at `now`.
    pub fn is_fresh(
        &self,
        now: DateTime<Utc>,
    ) -> bool {
        self.age(now) <= Duration::hours(MAX_RATE_AGE_HOURS)
    }

    pub fn age(
        &self,
        now: DateTime<Utc>,
    ) -> Duration {
        now.signed_duration_since(self.updated_at)
    }

    /// Guarantees the base currency is quoted, at 1, when upstream omits it.
    pub fn with_base_present(mut self) -> Self {
        self.rates.entry(self.base.clone()).or_insert(Decimal::ONE);
        self
    }

    /// The same rates expressed against `base`. Currencies whose rate is
    /// missing or not positive are dropped.
    pub fn rebased(
        &self,
        base: &str,
    ) -> Result<Self, FxRateError> {
        if base.eq_ignore_ascii_case(&self.base) {
            return Ok(self.clone().with_base_present());
        }
        let base_rate = self.rate_for(base)?;
        let rates = self
            .rates
            .iter()
            .filter(|(_, rate)| **rate > Decimal::ZERO)
            .map(|(code, rate)| (code.clone(), *rate / base_rate))
            .chain(std::iter::once((self.base.clone(), Decimal::ONE / base_rate)))
            .collect();
        Ok(Self::new(base, rates, self.updated_at).with_base_present())
    }
}

/// Source of exchange rates for a requested base currency.
#[async_trait]
pub trait FxRateProvider: Send + Sync {
    async fn latest_rates(
        &self,
        base: &str,
    ) -> Result<FxRatesResponse, FxProviderError>;
}

/// Serves a fixed rate table, rebased on request.
#[derive(Debug, Clone)]
pub struct StaticFxRateProvider {
    rates: FxRatesResponse,
}

impl StaticFxRateProvider {
    pub fn new(rates: FxRatesResponse) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl FxRateProvider for StaticFxRateProvider {
    async fn latest_rates(
        &self,
        base: &str,
    ) -> Result<FxRatesResponse, FxProviderError> {
        self.rates
            .rebased(base)
            .map_err(|e| FxProviderError::Unavailable(e.to_string()))
    }
}

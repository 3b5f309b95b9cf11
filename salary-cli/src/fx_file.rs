//! Exchange rates read from a JSON snapshot on disk.
//!
//! ```json
//! {"base": "USD", "updatedAt": "2025-07-01T12:00:00Z", "rates": {"EUR": 0.91, "SGD": 1.34}}
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use salary_core::fx::MAX_RATE_AGE_HOURS;
use salary_core::{FxProviderError, FxRateProvider, FxRatesResponse};
use tracing::{debug, warn};

/// Parses a snapshot and guarantees its own base is quoted.
///
/// # Errors
///
/// [`FxProviderError::Malformed`] for invalid JSON or an empty base.
pub fn parse_rates(text: &str) -> Result<FxRatesResponse, FxProviderError> {
    let raw: FxRatesResponse =
        serde_json::from_str(text).map_err(|e| FxProviderError::Malformed(e.to_string()))?;
    if raw.base.trim().is_empty() {
        return Err(FxProviderError::Malformed("missing base currency".to_string()));
    }
    Ok(FxRatesResponse::new(raw.base.trim(), raw.rates, raw.updated_at).with_base_present())
}

#[derive(Debug, Clone)]
pub struct FileFxRateProvider {
    path: PathBuf,
    max_age: Duration,
}

impl FileFxRateProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: Duration::hours(MAX_RATE_AGE_HOURS),
        }
    }

    /// Snapshots older than this are still used, with a warning.
    pub fn with_max_age_hours(
        mut self,
        hours: i64,
    ) -> Self {
        self.max_age = Duration::hours(hours);
        self
    }
}

#[async_trait]
impl FxRateProvider for FileFxRateProvider {
    async fn latest_rates(
        &self,
        base: &str,
    ) -> Result<FxRatesResponse, FxProviderError> {
        debug!(path = %self.path.display(), base, "reading exchange rates");
        let text = tokio::fs::read_to_string(&self.path).await?;
        let rates = parse_rates(&text)?;

        let age = rates.age(Utc::now());
        if age > self.max_age {
            warn!(
                path = %self.path.display(),
                age_hours = age.num_hours(),
                "exchange rates are older than the freshness window"
            );
        }

        rates
            .rebased(base)
            .map_err(|e| FxProviderError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const SNAPSHOT: &str = r#"{
        "base": "usd",
        "updatedAt": "2025-07-01T12:00:00Z",
        "rates": {"EUR": 0.8, "GBP": 0.5}
    }"#;

    fn write_snapshot(name: &str) -> PathBuf {
        let file = format!("salary-cli-{}-{name}.json", std::process::id());
        let path = std::env::temp_dir().join(file);
        std::fs::write(&path, SNAPSHOT).unwrap();
        path
    }

    #[test]
    fn parse_normalizes_base_and_adds_it() {
        let rates = parse_rates(SNAPSHOT).unwrap();

        assert_eq!(rates.base, "USD");
        assert_eq!(rates.rates.get("USD"), Some(&dec!(1)));
        assert_eq!(rates.rates.get("EUR"), Some(&dec!(0.8)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(parse_rates("{not json"), Err(FxProviderError::Malformed(_))));
        assert!(matches!(
            parse_rates(r#"{"base": " ", "updatedAt": "2025-07-01T12:00:00Z", "rates": {}}"#),
            Err(FxProviderError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn provider_rebases_to_requested_base() {
        let path = write_snapshot("rebase");
        let provider = FileFxRateProvider::new(&path);

        let rates = provider.latest_rates("EUR").await.unwrap();

        assert_eq!(rates.base, "EUR");
        assert_eq!(rates.rate_for("USD"), Ok(dec!(1.25)));
        assert_eq!(rates.rate_for("GBP"), Ok(dec!(0.625)));
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let provider = FileFxRateProvider::new("no/such/rates.json");

        let result = provider.latest_rates("USD").await;

        assert!(matches!(result, Err(FxProviderError::Io(_))));
    }

    #[tokio::test]
    async fn unknown_base_is_unavailable() {
        let path = write_snapshot("unknown");
        let provider = FileFxRateProvider::new(&path).with_max_age_hours(1);

        let result = provider.latest_rates("JPY").await;

        assert!(matches!(result, Err(FxProviderError::Unavailable(_))));
        std::fs::remove_file(path).unwrap();
    }
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalculatorError;

/// Every jurisdiction with a registered calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CountryCode {
    Us,
    Sg,
    Kr,
    Nl,
    Au,
    Pt,
    Th,
    Hk,
    Id,
    Tw,
    Uk,
    De,
    Ca,
    Ch,
}

impl CountryCode {
    /// Stable enumeration order used for listings and comparisons.
    pub const ALL: [CountryCode; 14] = [
        CountryCode::Us,
        CountryCode::Sg,
        CountryCode::Kr,
        CountryCode::Nl,
        CountryCode::Au,
        CountryCode::Pt,
        CountryCode::Th,
        CountryCode::Hk,
        CountryCode::Id,
        CountryCode::Tw,
        CountryCode::Uk,
        CountryCode::De,
        CountryCode::Ca,
        CountryCode::Ch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Sg => "SG",
            Self::Kr => "KR",
            Self::Nl => "NL",
            Self::Au => "AU",
            Self::Pt => "PT",
            Self::Th => "TH",
            Self::Hk => "HK",
            Self::Id => "ID",
            Self::Tw => "TW",
            Self::Uk => "UK",
            Self::De => "DE",
            Self::Ca => "CA",
            Self::Ch => "CH",
        }
    }

    /// Case-insensitive lookup. `GB` is accepted for the United Kingdom.
    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim().to_ascii_uppercase();
        if code == "GB" {
            return Some(Self::Uk);
        }
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }
}

impl FromStr for CountryCode {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CalculatorError::UnsupportedCountry(s.to_string()))
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable sub-national jurisdiction (state, province, canton, region).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub code: &'static str,
    pub name: &'static str,
}

impl Region {
    pub const fn new(
        code: &'static str,
        name: &'static str,
    ) -> Self {
        Self { code, name }
    }
}

/// Static per-country descriptor, loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryConfig {
    pub code: CountryCode,
    pub name: &'static str,
    /// ISO 4217 code of the currency salaries are entered in.
    pub currency: &'static str,
    pub tax_year: &'static str,
    /// ISO 8601 date the tables were last reviewed.
    pub last_updated: &'static str,
    pub supports_filing_status: bool,
    pub supports_regions: bool,
    pub default_region: Option<&'static str>,
    pub regions: &'static [Region],
}

impl CountryConfig {
    pub fn region(
        &self,
        code: &str,
    ) -> Option<&'static Region> {
        self.regions
            .iter()
            .find(|r| r.code.eq_ignore_ascii_case(code.trim()))
    }

    pub fn last_updated_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(self.last_updated, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(CountryCode::parse("sg"), Some(CountryCode::Sg));
        assert_eq!(CountryCode::parse(" De "), Some(CountryCode::De));
    }

    #[test]
    fn parse_accepts_gb_alias() {
        assert_eq!(CountryCode::parse("GB"), Some(CountryCode::Uk));
    }

    #[test]
    fn from_str_rejects_unknown_codes() {
        let result = "FR".parse::<CountryCode>();

        assert_eq!(
            result,
            Err(CalculatorError::UnsupportedCountry("FR".to_string()))
        );
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for code in CountryCode::ALL {
            assert_eq!(CountryCode::parse(code.as_str()), Some(code));
        }
    }

    #[test]
    fn serializes_as_uppercase_code() {
        let json = serde_json::to_string(&CountryCode::Hk).unwrap();

        assert_eq!(json, "\"HK\"");
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CountryCode, PayFrequency};
use crate::countries::{
    au::AuBreakdown, ca::CaBreakdown, ch::ChBreakdown, de::DeBreakdown, hk::HkBreakdown,
    id::IdBreakdown, kr::KrBreakdown, nl::NlBreakdown, pt::PtBreakdown, sg::SgBreakdown,
    th::ThBreakdown, tw::TwBreakdown, uk::UkBreakdown, us::UsBreakdown,
};

/// A named amount taken out of gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxItem {
    pub name: String,
    pub amount: Decimal,
}

impl TaxItem {
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Gross and net divided by the number of pay periods in a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerPeriod {
    pub gross: Decimal,
    pub net: Decimal,
    pub frequency: PayFrequency,
}

/// Output of every calculator.
///
/// * `taxes` holds the mandatory items (income taxes, surtaxes and mandatory
///   social contributions); they sum to `total_tax`.
/// * `contributions` holds voluntary elections; `total_deductions` is
///   `total_tax` plus their sum.
/// * `net_salary == gross_salary - total_deductions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub country: CountryCode,
    pub currency: String,
    pub gross_salary: Decimal,
    pub taxable_income: Decimal,
    pub taxes: Vec<TaxItem>,
    pub contributions: Vec<TaxItem>,
    pub total_tax: Decimal,
    pub total_deductions: Decimal,
    pub net_salary: Decimal,
    pub effective_tax_rate: Decimal,
    pub per_period: PerPeriod,
    pub breakdown: CountryBreakdown,
}

impl CalculationResult {
    /// Sum of the mandatory items with the given name, zero when absent.
    pub fn tax_amount(
        &self,
        name: &str,
    ) -> Decimal {
        self.taxes
            .iter()
            .filter(|t| t.name == name)
            .map(|t| t.amount)
            .sum()
    }

    /// Sum of the voluntary items with the given name, zero when absent.
    pub fn contribution_amount(
        &self,
        name: &str,
    ) -> Decimal {
        self.contributions
            .iter()
            .filter(|t| t.name == name)
            .map(|t| t.amount)
            .sum()
    }
}

/// Jurisdiction-specific detail, tagged by country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "country", rename_all = "UPPERCASE")]
pub enum CountryBreakdown {
    Us(UsBreakdown),
    Sg(SgBreakdown),
    Kr(KrBreakdown),
    Nl(NlBreakdown),
    Au(AuBreakdown),
    Pt(PtBreakdown),
    Th(ThBreakdown),
    Hk(HkBreakdown),
    Id(IdBreakdown),
    Tw(TwBreakdown),
    Uk(UkBreakdown),
    De(DeBreakdown),
    Ca(CaBreakdown),
    Ch(ChBreakdown),
}

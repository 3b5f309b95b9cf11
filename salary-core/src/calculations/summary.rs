//! Assembly of a [`CalculationResult`] from itemised amounts.

use rust_decimal::Decimal;

use super::common::{non_negative, ratio, round_half_up};
use crate::models::{
    CalculationResult, CountryBreakdown, CountryConfig, CountryCode, PayFrequency, PerPeriod,
    TaxItem,
};

/// Collects the line items of one calculation and derives the totals.
///
/// Mandatory items go through [`tax`](Self::tax) and voluntary elections
/// through [`contribution`](Self::contribution). `build` then fixes
/// `net_salary = gross_salary - total_deductions`, so every calculator gets
/// the balance identity for free.
#[derive(Debug, Clone)]
pub struct ResultBuilder {
    country: CountryCode,
    currency: &'static str,
    gross_salary: Decimal,
    frequency: PayFrequency,
    taxable_income: Decimal,
    taxes: Vec<TaxItem>,
    contributions: Vec<TaxItem>,
}

impl ResultBuilder {
    pub fn new(
        config: &CountryConfig,
        gross_salary: Decimal,
        frequency: PayFrequency,
    ) -> Self {
        Self {
            country: config.code,
            currency: config.currency,
            gross_salary: non_negative(gross_salary),
            frequency,
            taxable_income: Decimal::ZERO,
            taxes: Vec::new(),
            contributions: Vec::new(),
        }
    }

    pub fn taxable_income(
        mut self,
        taxable_income: Decimal,
    ) -> Self {
        self.taxable_income = non_negative(taxable_income);
        self
    }

    /// Adds a mandatory item, even when it is zero.
    pub fn tax(
        mut self,
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        self.taxes.push(TaxItem::new(name, non_negative(amount)));
        self
    }

    /// Adds a mandatory item only when it is positive.
    pub fn tax_if_any(
        self,
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        if amount > Decimal::ZERO {
            self.tax(name, amount)
        } else {
            self
        }
    }

    /// Adds a voluntary election. Zero elections are left out.
    pub fn contribution(
        mut self,
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        if amount > Decimal::ZERO {
            self.contributions.push(TaxItem::new(name, amount));
        }
        self
    }

    pub fn build(
        self,
        breakdown: CountryBreakdown,
    ) -> CalculationResult {
        let total_tax: Decimal = self.taxes.iter().map(|t| t.amount).sum();
        let voluntary: Decimal = self.contributions.iter().map(|t| t.amount).sum();
        let total_deductions = total_tax + voluntary;
        let net_salary = self.gross_salary - total_deductions;
        let periods = self.frequency.periods();

        CalculationResult {
            country: self.country,
            currency: self.currency.to_string(),
            gross_salary: self.gross_salary,
            taxable_income: self.taxable_income,
            taxes: self.taxes,
            contributions: self.contributions,
            total_tax,
            total_deductions,
            net_salary,
            effective_tax_rate: ratio(total_tax, self.gross_salary),
            per_period: PerPeriod {
                gross: round_half_up(self.gross_salary / periods),
                net: round_half_up(net_salary / periods),
                frequency: self.frequency,
            },
            breakdown,
        }
    }
}

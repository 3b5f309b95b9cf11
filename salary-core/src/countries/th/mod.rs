//! Thailand, personal income tax on employment income (section 40(1)).

mod tables;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{monthly_capped_contribution, non_negative, round_half_up};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, PayFrequency, SharedCeiling,
};

pub use self::tables::BRACKETS;

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Th,
    name: "Thailand",
    currency: "THB",
    tax_year: "2025",
    last_updated: "2025-03-01",
    supports_filing_status: true,
    supports_regions: false,
    default_region: None,
    regions: &[],
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThContributions {
    pub provident_fund: Decimal,
    pub rmf: Decimal,
    pub ssf: Decimal,
    pub pension_insurance: Decimal,
    pub thai_esg: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    /// Spouse without income of their own.
    pub spouse_allowance: bool,
    pub children: u8,
    pub parents: u8,
    pub contributions: ThContributions,
}

impl Default for ThInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(1_200_000),
            pay_frequency: PayFrequency::Monthly,
            spouse_allowance: false,
            children: 0,
            parents: 0,
            contributions: ThContributions::default(),
        }
    }
}

impl CountryInputs for ThInputs {
    fn gross_salary(&self) -> Decimal {
        self.gross_salary
    }

    fn set_gross_salary(
        &mut self,
        gross_salary: Decimal,
    ) {
        self.gross_salary = gross_salary;
    }

    fn pay_frequency(&self) -> PayFrequency {
        self.pay_frequency
    }

    fn set_pay_frequency(
        &mut self,
        frequency: PayFrequency,
    ) {
        self.pay_frequency = frequency;
    }

    fn contribution_limits(&self) -> ContributionLimits {
        let gross = non_negative(self.gross_salary);
        let [pvd, rmf, ssf, pension, esg] = SAVINGS_LIMITS.map(|(_, share, cap)| {
            round_half_up(gross * share).min(cap)
        });
        ContributionLimits::new()
            .with(
                "provident_fund",
                ContributionLimit::new(pvd, "Provident fund", "Up to 15% of salary", true),
            )
            .with(
                "rmf",
                ContributionLimit::new(rmf, "RMF", "Retirement mutual fund, 30% of income", true),
            )
            .with(
                "ssf",
                ContributionLimit::new(ssf, "SSF", "Super savings fund, 30% of income", true),
            )
            .with(
                "pension_insurance",
                ContributionLimit::new(
                    pension,
                    "Pension insurance",
                    "Annuity premiums, 15% of income",
                    true,
                ),
            )
            .with(
                "thai_esg",
                ContributionLimit::new(esg, "Thai ESG", "Thailand ESG fund, 30% of income", true),
            )
            .with_shared(SharedCeiling::new(
                "Retirement savings",
                RETIREMENT_SAVINGS_CAP,
                &["provident_fund", "rmf", "ssf", "pension_insurance"],
            ))
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        self.parents = self.parents.min(MAX_PARENTS);
        let limits = self.contribution_limits();
        let c = &mut self.contributions;
        enforce_limits(
            &limits,
            &mut [
                Election::new("provident_fund", &mut c.provident_fund),
                Election::new("rmf", &mut c.rmf),
                Election::new("ssf", &mut c.ssf),
                Election::new("pension_insurance", &mut c.pension_insurance),
                Election::new("thai_esg", &mut c.thai_esg),
            ],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThBreakdown {
    pub expense_deduction: Decimal,
    pub allowances: Decimal,
    pub social_security: Decimal,
    pub savings_deductions: Decimal,
    pub net_taxable_income: Decimal,
    pub income_tax: Decimal,
}

/// Calculator for Thai employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThCalculator;

impl ThCalculator {
    pub fn compute(
        &self,
        inputs: &ThInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let c = &inputs.contributions;

        let expense = (gross * EXPENSE_RATE).min(EXPENSE_CAP);
        let social_security = round_half_up(monthly_capped_contribution(
            gross,
            SOCIAL_SECURITY_RATE,
            SOCIAL_SECURITY_MONTHLY_CAP,
        ));
        let allowances = self.allowances(inputs);
        let savings = c.provident_fund + c.rmf + c.ssf + c.pension_insurance + c.thai_esg;
        let net_taxable =
            non_negative(gross - expense - allowances - social_security - savings);
        let income_tax = round_half_up(progressive_tax(net_taxable, &BRACKETS));

        let breakdown = ThBreakdown {
            expense_deduction: expense,
            allowances,
            social_security,
            savings_deductions: savings,
            net_taxable_income: net_taxable,
            income_tax,
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(net_taxable)
            .tax("Personal income tax", income_tax)
            .tax("Social security", social_security)
            .contribution("Provident fund", c.provident_fund)
            .contribution("RMF", c.rmf)
            .contribution("SSF", c.ssf)
            .contribution("Pension insurance", c.pension_insurance)
            .contribution("Thai ESG", c.thai_esg)
            .build(CountryBreakdown::Th(breakdown))
    }

    fn allowances(
        &self,
        inputs: &ThInputs,
    ) -> Decimal {
        let spouse = if inputs.spouse_allowance {
            SPOUSE_ALLOWANCE
        } else {
            Decimal::ZERO
        };
        PERSONAL_ALLOWANCE
            + spouse
            + CHILD_ALLOWANCE * Decimal::from(inputs.children)
            + PARENT_ALLOWANCE * Decimal::from(inputs.parents.min(MAX_PARENTS))
    }
}

impl SalaryCalculator for ThCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Th
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Th(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Th, other)),
        }
    }
}

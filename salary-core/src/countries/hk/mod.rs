//! Hong Kong salaries tax.
//!
//! Tax is the lower of progressive rates on net chargeable income and the
//! standard rate on net income, less the year's one-off reduction. Amounts
//! round to the cent.

mod tables;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{annualize, monthly, non_negative, round_half_up};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, MaritalStatus, PayFrequency, SharedCeiling,
};

pub use self::tables::{BRACKETS, STANDARD_RATE_BRACKETS};

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Hk,
    name: "Hong Kong",
    currency: "HKD",
    tax_year: "2024/25",
    last_updated: "2025-02-26",
    supports_filing_status: true,
    supports_regions: false,
    default_region: None,
    regions: &[],
};

/// Deductions paid out of pocket rather than from salary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HkReliefs {
    pub home_loan_interest: Decimal,
    pub domestic_rent: Decimal,
    pub vhis_policies: u8,
    pub vhis_premiums: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HkContributions {
    /// MPF tax-deductible voluntary contributions.
    pub tvc: Decimal,
    /// Qualifying deferred annuity premiums.
    pub qdap: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HkInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    pub marital_status: MaritalStatus,
    /// Cannot be combined with the married person's allowance.
    pub single_parent: bool,
    pub children: u8,
    /// Children born in the year, a subset of `children`.
    pub newborns: u8,
    pub dependent_parents: u8,
    pub reliefs: HkReliefs,
    pub contributions: HkContributions,
}

impl Default for HkInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(600_000),
            pay_frequency: PayFrequency::Monthly,
            marital_status: MaritalStatus::Single,
            single_parent: false,
            children: 0,
            newborns: 0,
            dependent_parents: 0,
            reliefs: HkReliefs::default(),
            contributions: HkContributions::default(),
        }
    }
}

impl CountryInputs for HkInputs {
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
        ContributionLimits::new()
            .with(
                "tvc",
                ContributionLimit::new(
                    VOLUNTARY_SAVINGS_CAP,
                    "MPF TVC",
                    "Tax-deductible voluntary MPF contribution",
                    true,
                ),
            )
            .with(
                "qdap",
                ContributionLimit::new(
                    VOLUNTARY_SAVINGS_CAP,
                    "QDAP",
                    "Qualifying deferred annuity premiums",
                    true,
                ),
            )
            .with_shared(SharedCeiling::new(
                "TVC and QDAP",
                VOLUNTARY_SAVINGS_CAP,
                &["tvc", "qdap"],
            ))
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        if self.marital_status.is_married() {
            self.single_parent = false;
        }
        if self.children == 0 {
            self.single_parent = false;
        }
        self.newborns = self.newborns.min(self.children);
        self.dependent_parents = self.dependent_parents.min(MAX_DEPENDENT_PARENTS);
        self.reliefs.home_loan_interest =
            non_negative(self.reliefs.home_loan_interest).min(HOME_LOAN_INTEREST_CAP);
        self.reliefs.domestic_rent =
            non_negative(self.reliefs.domestic_rent).min(DOMESTIC_RENT_CAP);
        self.reliefs.vhis_premiums = non_negative(self.reliefs.vhis_premiums)
            .min(VHIS_CAP_PER_POLICY * Decimal::from(self.reliefs.vhis_policies));

        let limits = self.contribution_limits();
        let c = &mut self.contributions;
        enforce_limits(
            &limits,
            &mut [
                Election::new("tvc", &mut c.tvc),
                Election::new("qdap", &mut c.qdap),
            ],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HkBreakdown {
    pub mpf: Decimal,
    pub deductions: Decimal,
    pub net_income: Decimal,
    pub allowances: Decimal,
    pub net_chargeable_income: Decimal,
    pub progressive_tax: Decimal,
    pub standard_rate_tax: Decimal,
    pub tax_reduction: Decimal,
    pub salaries_tax: Decimal,
    /// Whether the standard rate was the lower of the two.
    pub standard_rate_applied: bool,
}

/// Calculator for Hong Kong employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct HkCalculator;

impl HkCalculator {
    pub fn compute(
        &self,
        inputs: &HkInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let mpf = self.mpf(gross);
        let r = &inputs.reliefs;
        let c = &inputs.contributions;

        let deductions = mpf
            + c.tvc
            + c.qdap
            + r.home_loan_interest
            + r.domestic_rent
            + r.vhis_premiums;
        let net_income = non_negative(gross - deductions);
        let allowances = self.allowances(inputs);
        let chargeable = non_negative(net_income - allowances);

        let progressive = round_half_up(progressive_tax(chargeable, &BRACKETS));
        let standard = round_half_up(progressive_tax(net_income, &STANDARD_RATE_BRACKETS));
        let standard_rate_applied = standard < progressive;
        let before_reduction = progressive.min(standard);
        let reduction = before_reduction.min(TAX_REDUCTION_CAP);
        let salaries_tax = before_reduction - reduction;

        let breakdown = HkBreakdown {
            mpf,
            deductions,
            net_income,
            allowances,
            net_chargeable_income: chargeable,
            progressive_tax: progressive,
            standard_rate_tax: standard,
            tax_reduction: reduction,
            salaries_tax,
            standard_rate_applied,
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(chargeable)
            .tax("Salaries tax", salaries_tax)
            .tax("MPF", mpf)
            .contribution("MPF TVC", c.tvc)
            .contribution("QDAP", c.qdap)
            .build(CountryBreakdown::Hk(breakdown))
    }

    /// Mandatory employee contribution; nil below the minimum relevant income.
    fn mpf(
        &self,
        gross: Decimal,
    ) -> Decimal {
        let wage = monthly(gross);
        if wage < MPF_MIN_RELEVANT_INCOME {
            return Decimal::ZERO;
        }
        round_half_up(annualize(wage.min(MPF_MAX_RELEVANT_INCOME) * MPF_RATE))
    }

    fn allowances(
        &self,
        inputs: &HkInputs,
    ) -> Decimal {
        let status = if inputs.marital_status.is_married() {
            MARRIED_ALLOWANCE
        } else if inputs.single_parent {
            BASIC_ALLOWANCE + SINGLE_PARENT_ALLOWANCE
        } else {
            BASIC_ALLOWANCE
        };
        status
            + CHILD_ALLOWANCE * Decimal::from(inputs.children)
            + NEWBORN_ALLOWANCE * Decimal::from(inputs.newborns.min(inputs.children))
            + DEPENDENT_PARENT_ALLOWANCE * Decimal::from(inputs.dependent_parents)
    }
}

impl SalaryCalculator for HkCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Hk
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Hk(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Hk, other)),
        }
    }
}

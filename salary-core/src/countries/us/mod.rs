//! United States: federal income tax, FICA and state taxes.
//!
//! Every component is rounded half-up to the cent.

mod states;
mod tables;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use self::states::{
    Allowance, PayrollTax, REGIONS, STATES, StateDeduction, StateRules, StateSchedule, Surtax,
    rules_for,
};
use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, PayFrequency, SharedCeiling, TaxBracket, TaxItem,
};

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Us,
    name: "United States",
    currency: "USD",
    tax_year: "2025",
    last_updated: "2025-07-10",
    supports_filing_status: true,
    supports_regions: true,
    default_region: Some("CA"),
    regions: &REGIONS,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
}

impl FilingStatus {
    pub fn is_joint(&self) -> bool {
        matches!(self, Self::MarriedFilingJointly)
    }

    pub fn brackets(&self) -> &'static [TaxBracket] {
        match self {
            Self::Single => &SINGLE_BRACKETS,
            Self::MarriedFilingJointly => &MARRIED_JOINT_BRACKETS,
            Self::MarriedFilingSeparately => &MARRIED_SEPARATE_BRACKETS,
            Self::HeadOfHousehold => &HEAD_OF_HOUSEHOLD_BRACKETS,
        }
    }

    pub fn standard_deduction(&self) -> Decimal {
        match self {
            Self::Single | Self::MarriedFilingSeparately => STANDARD_DEDUCTION_SINGLE,
            Self::MarriedFilingJointly => STANDARD_DEDUCTION_JOINT,
            Self::HeadOfHousehold => STANDARD_DEDUCTION_HEAD_OF_HOUSEHOLD,
        }
    }

    fn additional_medicare_threshold(&self) -> Decimal {
        match self {
            Self::Single | Self::HeadOfHousehold => ADDITIONAL_MEDICARE_SINGLE,
            Self::MarriedFilingJointly => ADDITIONAL_MEDICARE_JOINT,
            Self::MarriedFilingSeparately => ADDITIONAL_MEDICARE_SEPARATE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HsaCoverage {
    #[default]
    SelfOnly,
    Family,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsContributions {
    pub traditional_401k: Decimal,
    pub roth_401k: Decimal,
    pub traditional_ira: Decimal,
    pub roth_ira: Decimal,
    pub hsa: Decimal,
    pub fsa: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    pub filing_status: FilingStatus,
    /// Two-letter state code.
    pub state: String,
    pub age: u8,
    /// Qualifying children under 17; also counted as state dependents.
    pub children: u8,
    pub hsa_coverage: HsaCoverage,
    pub contributions: UsContributions,
}

impl Default for UsInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(100_000),
            pay_frequency: PayFrequency::Biweekly,
            filing_status: FilingStatus::Single,
            state: "CA".to_string(),
            age: 30,
            children: 0,
            hsa_coverage: HsaCoverage::SelfOnly,
            contributions: UsContributions::default(),
        }
    }
}

impl CountryInputs for UsInputs {
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

    fn region(&self) -> Option<String> {
        Some(self.state.clone())
    }

    fn set_region(
        &mut self,
        region: &str,
    ) -> bool {
        match rules_for(region) {
            Some(rules) => {
                self.state = rules.code.to_string();
                true
            }
            None => false,
        }
    }

    fn contribution_limits(&self) -> ContributionLimits {
        let deferral = ELECTIVE_DEFERRAL_LIMIT
            + match self.age {
                60..=63 => DEFERRAL_SUPER_CATCH_UP,
                50..=u8::MAX => DEFERRAL_CATCH_UP,
                _ => Decimal::ZERO,
            };
        let ira = IRA_LIMIT
            + if self.age >= 50 {
                IRA_CATCH_UP
            } else {
                Decimal::ZERO
            };
        let hsa = match self.hsa_coverage {
            HsaCoverage::SelfOnly => HSA_SELF_LIMIT,
            HsaCoverage::Family => HSA_FAMILY_LIMIT,
        } + if self.age >= 55 {
            HSA_CATCH_UP
        } else {
            Decimal::ZERO
        };

        ContributionLimits::new()
            .with(
                "traditional_401k",
                ContributionLimit::new(
                    deferral,
                    "Traditional 401(k)",
                    "Pre-tax elective deferral",
                    true,
                ),
            )
            .with(
                "roth_401k",
                ContributionLimit::new(
                    deferral,
                    "Roth 401(k)",
                    "After-tax elective deferral",
                    false,
                ),
            )
            .with(
                "traditional_ira",
                ContributionLimit::new(ira, "Traditional IRA", "Deductible IRA contribution", true),
            )
            .with(
                "roth_ira",
                ContributionLimit::new(ira, "Roth IRA", "After-tax IRA contribution", false),
            )
            .with(
                "hsa",
                ContributionLimit::new(
                    hsa,
                    "HSA",
                    "Health savings account, exempt from FICA",
                    true,
                ),
            )
            .with(
                "fsa",
                ContributionLimit::new(
                    FSA_LIMIT,
                    "Health FSA",
                    "Flexible spending account, exempt from FICA",
                    true,
                ),
            )
            .with_shared(SharedCeiling::new(
                "Elective deferrals",
                deferral,
                &["traditional_401k", "roth_401k"],
            ))
            .with_shared(SharedCeiling::new(
                "IRA contributions",
                ira,
                &["traditional_ira", "roth_ira"],
            ))
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        self.state = self.state.trim().to_ascii_uppercase();
        let limits = self.contribution_limits();
        let c = &mut self.contributions;
        enforce_limits(
            &limits,
            &mut [
                Election::new("traditional_401k", &mut c.traditional_401k),
                Election::new("roth_401k", &mut c.roth_401k),
                Election::new("hsa", &mut c.hsa),
                Election::new("fsa", &mut c.fsa),
                Election::new("traditional_ira", &mut c.traditional_ira),
                Election::new("roth_ira", &mut c.roth_ira),
            ],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsBreakdown {
    pub adjusted_gross_income: Decimal,
    pub federal_taxable_income: Decimal,
    pub federal_tax_before_credits: Decimal,
    pub child_tax_credit: Decimal,
    pub federal_income_tax: Decimal,
    pub fica_wages: Decimal,
    pub social_security: Decimal,
    pub medicare: Decimal,
    pub additional_medicare: Decimal,
    pub state: String,
    pub state_taxable_income: Decimal,
    pub state_income_tax: Decimal,
    pub state_surtax: Decimal,
    pub state_payroll: Vec<TaxItem>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct StateTax {
    taxable_income: Decimal,
    income_tax: Decimal,
    surtax: Option<(&'static str, Decimal)>,
    payroll: Vec<TaxItem>,
}

/// Calculator for US employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsCalculator;

impl UsCalculator {
    pub fn compute(
        &self,
        inputs: &UsInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let c = &inputs.contributions;
        let status = inputs.filing_status;

        let fica_wages = non_negative(gross - c.hsa - c.fsa);
        let agi = non_negative(gross - c.traditional_401k - c.traditional_ira - c.hsa - c.fsa);
        let federal_taxable = non_negative(agi - status.standard_deduction());
        let before_credits = round_half_up(progressive_tax(federal_taxable, status.brackets()));
        let child_credit = self
            .child_tax_credit(agi, status, inputs.children)
            .min(before_credits);
        let federal_tax = before_credits - child_credit;

        let social_security =
            round_half_up(fica_wages.min(SOCIAL_SECURITY_WAGE_BASE) * SOCIAL_SECURITY_RATE);
        let medicare = round_half_up(fica_wages * MEDICARE_RATE);
        let additional_medicare = round_half_up(
            non_negative(fica_wages - status.additional_medicare_threshold())
                * ADDITIONAL_MEDICARE_RATE,
        );

        let state = self.state_tax(inputs, gross, fica_wages);

        let mut builder = ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(federal_taxable)
            .tax("Federal income tax", federal_tax)
            .tax("Social Security", social_security)
            .tax("Medicare", medicare)
            .tax_if_any("Additional Medicare", additional_medicare);
        if rules_for(&inputs.state).is_some_and(StateRules::has_income_tax) {
            builder = builder.tax("State income tax", state.income_tax);
        }
        if let Some((name, amount)) = state.surtax {
            builder = builder.tax_if_any(name, amount);
        }
        for item in &state.payroll {
            builder = builder.tax(item.name.clone(), item.amount);
        }

        let breakdown = UsBreakdown {
            adjusted_gross_income: agi,
            federal_taxable_income: federal_taxable,
            federal_tax_before_credits: before_credits,
            child_tax_credit: child_credit,
            federal_income_tax: federal_tax,
            fica_wages,
            social_security,
            medicare,
            additional_medicare,
            state: inputs.state.clone(),
            state_taxable_income: state.taxable_income,
            state_income_tax: state.income_tax,
            state_surtax: state.surtax.map_or(Decimal::ZERO, |(_, amount)| amount),
            state_payroll: state.payroll,
        };

        builder
            .contribution("Traditional 401(k)", c.traditional_401k)
            .contribution("Roth 401(k)", c.roth_401k)
            .contribution("Traditional IRA", c.traditional_ira)
            .contribution("Roth IRA", c.roth_ira)
            .contribution("HSA", c.hsa)
            .contribution("FSA", c.fsa)
            .build(CountryBreakdown::Us(breakdown))
    }

    /// Non-refundable credit, reduced by 50 per started 1,000 above the
    /// phase-out threshold.
    fn child_tax_credit(
        &self,
        agi: Decimal,
        status: FilingStatus,
        children: u8,
    ) -> Decimal {
        if children == 0 {
            return Decimal::ZERO;
        }
        let threshold = if status.is_joint() {
            CHILD_CREDIT_PHASE_OUT_JOINT
        } else {
            CHILD_CREDIT_PHASE_OUT_SINGLE
        };
        let excess = non_negative(agi - threshold);
        let reduction = (excess / Decimal::ONE_THOUSAND).ceil() * CHILD_CREDIT_PHASE_OUT_STEP;
        non_negative(CHILD_TAX_CREDIT * Decimal::from(children) - reduction)
    }

    fn state_tax(
        &self,
        inputs: &UsInputs,
        gross: Decimal,
        fica_wages: Decimal,
    ) -> StateTax {
        let Some(rules) = rules_for(&inputs.state) else {
            warn!(state = %inputs.state, "unknown state, no state taxes applied");
            return StateTax::default();
        };
        let c = &inputs.contributions;
        let status = inputs.filing_status;
        let joint = status.is_joint();
        let dependents = Decimal::from(inputs.children);

        let mut wages = gross - c.fsa;
        if !rules.taxes_retirement_deferrals {
            wages -= c.traditional_401k + c.traditional_ira;
        }
        if !rules.taxes_hsa {
            wages -= c.hsa;
        }

        let deduction = match rules.deduction {
            StateDeduction::None => Decimal::ZERO,
            StateDeduction::Federal => status.standard_deduction(),
            StateDeduction::Fixed { single, joint: j } => {
                if joint {
                    j
                } else {
                    single
                }
            }
        };
        let exemption = allowance(&rules.exemption, joint, dependents);
        let taxable_income = non_negative(wages - deduction - exemption);

        let bracket_tax = match rules.schedule {
            StateSchedule::None => Decimal::ZERO,
            StateSchedule::Flat(rate) => taxable_income * rate,
            StateSchedule::Progressive { single, joint: j } => {
                progressive_tax(taxable_income, if joint { j } else { single })
            }
        };
        let credits = allowance(&rules.credit, joint, dependents);
        let income_tax = round_half_up(non_negative(bracket_tax - credits));

        let surtax = rules.surtax.map(|surtax| {
            (
                surtax.name,
                round_half_up(non_negative(taxable_income - surtax.threshold) * surtax.rate),
            )
        });

        let payroll = rules
            .payroll
            .iter()
            .map(|tax| TaxItem::new(tax.name, payroll_tax(tax, fica_wages)))
            .collect();

        StateTax {
            taxable_income,
            income_tax,
            surtax,
            payroll,
        }
    }
}

fn allowance(
    allowance: &Allowance,
    joint: bool,
    dependents: Decimal,
) -> Decimal {
    let base = if joint {
        allowance.joint
    } else {
        allowance.single
    };
    base + allowance.per_dependent * dependents
}

fn payroll_tax(
    tax: &PayrollTax,
    wages: Decimal,
) -> Decimal {
    let base = tax.wage_base.map_or(wages, |cap| wages.min(cap));
    let amount = base * tax.rate;
    round_half_up(tax.annual_max.map_or(amount, |max| amount.min(max)))
}

impl SalaryCalculator for UsCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Us
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Us(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Us, other)),
        }
    }
}

//! Singapore, resident and non-resident employment income.
//!
//! The CPF employee share is floored to the dollar each month. Tax rounds to
//! the cent.

mod tables;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{annualize, max, monthly, non_negative, round_half_up};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, PayFrequency,
};

pub use self::tables::RESIDENT_BRACKETS;

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Sg,
    name: "Singapore",
    currency: "SGD",
    tax_year: "YA2026",
    last_updated: "2025-02-18",
    supports_filing_status: false,
    supports_regions: false,
    default_region: None,
    regions: &[],
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SgResidency {
    #[default]
    Citizen,
    PermanentResident,
    /// Employment-pass holders; no CPF.
    Foreigner,
}

impl SgResidency {
    pub fn pays_cpf(&self) -> bool {
        !matches!(self, Self::Foreigner)
    }
}

/// NSman relief tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NsmanRelief {
    #[default]
    None,
    Inactive,
    Active,
    KeyAppointment,
}

impl NsmanRelief {
    pub fn amount(&self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::Inactive => dec!(1_500),
            Self::Active => dec!(3_000),
            Self::KeyAppointment => dec!(5_000),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SgReliefs {
    pub spouse: bool,
    pub qualifying_children: u8,
    /// Dependent parents living in Singapore, at most two.
    pub parents: u8,
    pub nsman: NsmanRelief,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SgContributions {
    /// Supplementary Retirement Scheme.
    pub srs: Decimal,
    pub cpf_top_up_self: Decimal,
    pub cpf_top_up_family: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SgInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    pub residency: SgResidency,
    pub tax_resident: bool,
    pub age: u8,
    pub reliefs: SgReliefs,
    pub contributions: SgContributions,
}

impl Default for SgInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(96_000),
            pay_frequency: PayFrequency::Monthly,
            residency: SgResidency::Citizen,
            tax_resident: true,
            age: 30,
            reliefs: SgReliefs::default(),
            contributions: SgContributions::default(),
        }
    }
}

impl CountryInputs for SgInputs {
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
        let srs_cap = if self.residency.pays_cpf() {
            SRS_CAP_LOCAL
        } else {
            SRS_CAP_FOREIGNER
        };
        ContributionLimits::new()
            .with(
                "srs",
                ContributionLimit::new(
                    srs_cap,
                    "SRS",
                    "Supplementary Retirement Scheme contribution",
                    true,
                ),
            )
            .with(
                "cpf_top_up_self",
                ContributionLimit::new(
                    CPF_TOP_UP_SELF_CAP,
                    "CPF cash top-up (self)",
                    "Top-up to own Special/Retirement Account",
                    true,
                ),
            )
            .with(
                "cpf_top_up_family",
                ContributionLimit::new(
                    CPF_TOP_UP_FAMILY_CAP,
                    "CPF cash top-up (family)",
                    "Top-up to family members' accounts",
                    true,
                ),
            )
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        self.reliefs.parents = self.reliefs.parents.min(MAX_PARENTS);
        let limits = self.contribution_limits();
        let contributions = &mut self.contributions;
        enforce_limits(
            &limits,
            &mut [
                Election::new("srs", &mut contributions.srs),
                Election::new("cpf_top_up_self", &mut contributions.cpf_top_up_self),
                Election::new("cpf_top_up_family", &mut contributions.cpf_top_up_family),
            ],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SgBreakdown {
    pub cpf_employee: Decimal,
    pub earned_income_relief: Decimal,
    pub cpf_relief: Decimal,
    pub personal_reliefs: Decimal,
    pub voluntary_reliefs: Decimal,
    /// Reliefs actually granted after the overall cap.
    pub total_reliefs: Decimal,
    pub chargeable_income: Decimal,
    pub income_tax: Decimal,
    pub non_resident: bool,
}

/// Calculator for Singapore employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct SgCalculator;

impl SgCalculator {
    pub fn compute(
        &self,
        inputs: &SgInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let cpf = if inputs.residency.pays_cpf() {
            self.cpf_employee(gross, inputs.age)
        } else {
            Decimal::ZERO
        };
        let contributions = &inputs.contributions;
        let voluntary =
            contributions.srs + contributions.cpf_top_up_self + contributions.cpf_top_up_family;

        let (breakdown, chargeable) = if inputs.tax_resident {
            let earned = self.earned_income_relief(inputs.age);
            let personal = self.personal_reliefs(&inputs.reliefs);
            let uncapped = earned + cpf + personal + voluntary;
            let total_reliefs = uncapped.min(RELIEF_CAP);
            let chargeable = non_negative(gross - total_reliefs);
            let tax = round_half_up(progressive_tax(chargeable, &RESIDENT_BRACKETS));
            (
                SgBreakdown {
                    cpf_employee: cpf,
                    earned_income_relief: earned,
                    cpf_relief: cpf,
                    personal_reliefs: personal,
                    voluntary_reliefs: voluntary,
                    total_reliefs,
                    chargeable_income: chargeable,
                    income_tax: tax,
                    non_resident: false,
                },
                chargeable,
            )
        } else {
            let tax = self.non_resident_tax(gross);
            (
                SgBreakdown {
                    cpf_employee: cpf,
                    chargeable_income: gross,
                    income_tax: tax,
                    non_resident: true,
                    ..SgBreakdown::default()
                },
                gross,
            )
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(chargeable)
            .tax("Income tax", breakdown.income_tax)
            .tax_if_any("CPF employee", cpf)
            .contribution("SRS", contributions.srs)
            .contribution("CPF top-up (self)", contributions.cpf_top_up_self)
            .contribution("CPF top-up (family)", contributions.cpf_top_up_family)
            .build(CountryBreakdown::Sg(breakdown))
    }

    fn cpf_rate(
        &self,
        age: u8,
    ) -> Decimal {
        CPF_EMPLOYEE_RATES
            .iter()
            .find(|(upper, _)| age <= *upper)
            .map_or(Decimal::ZERO, |(_, rate)| *rate)
    }

    /// Employee share with the 500–750 phase-in, floored monthly.
    fn cpf_employee(
        &self,
        gross: Decimal,
        age: u8,
    ) -> Decimal {
        let wage = monthly(gross).min(CPF_OW_CEILING);
        let rate = self.cpf_rate(age);
        let share = if wage <= CPF_EMPLOYEE_FLOOR {
            Decimal::ZERO
        } else if wage <= CPF_PHASE_IN_END {
            rate * dec!(3) * (wage - CPF_EMPLOYEE_FLOOR)
        } else {
            rate * wage
        };
        annualize(share.floor())
    }

    fn earned_income_relief(
        &self,
        age: u8,
    ) -> Decimal {
        EARNED_INCOME_RELIEF
            .iter()
            .find(|(upper, _)| age < *upper)
            .map_or(Decimal::ZERO, |(_, relief)| *relief)
    }

    fn personal_reliefs(
        &self,
        reliefs: &SgReliefs,
    ) -> Decimal {
        let spouse = if reliefs.spouse {
            SPOUSE_RELIEF
        } else {
            Decimal::ZERO
        };
        spouse
            + QUALIFYING_CHILD_RELIEF * Decimal::from(reliefs.qualifying_children)
            + PARENT_RELIEF * Decimal::from(reliefs.parents.min(MAX_PARENTS))
            + reliefs.nsman.amount()
    }

    /// The higher of the flat employment rate and resident rates, no reliefs.
    fn non_resident_tax(
        &self,
        gross: Decimal,
    ) -> Decimal {
        round_half_up(max(
            gross * NON_RESIDENT_EMPLOYMENT_RATE,
            progressive_tax(gross, &RESIDENT_BRACKETS),
        ))
    }
}

impl SalaryCalculator for SgCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Sg
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Sg(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Sg, other)),
        }
    }
}

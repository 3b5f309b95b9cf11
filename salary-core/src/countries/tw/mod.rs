//! Taiwan consolidated income tax on salary income.
//!
//! Residents are taxed on net income after the salary special deduction,
//! exemptions, the standard deduction, the preschool child deduction and the
//! basic living expense difference. Non-residents are withheld at a flat rate.
//! Amounts round to the whole dollar.

mod tables;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{annualize, monthly, non_negative, round_whole};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, MaritalStatus, PayFrequency,
};

pub use self::tables::BRACKETS;

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Tw,
    name: "Taiwan",
    currency: "TWD",
    tax_year: "2025",
    last_updated: "2025-01-15",
    supports_filing_status: true,
    supports_regions: false,
    default_region: None,
    regions: &[],
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwContributions {
    pub voluntary_pension: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    pub marital_status: MaritalStatus,
    /// Claimed dependents, children included.
    pub dependents: u8,
    /// Dependents aged five or under, a subset of `dependents`.
    pub preschool_children: u8,
    pub age: u8,
    /// Present in Taiwan for 183 days or more in the year.
    pub resident: bool,
    pub contributions: TwContributions,
}

impl Default for TwInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(1_200_000),
            pay_frequency: PayFrequency::Monthly,
            marital_status: MaritalStatus::Single,
            dependents: 0,
            preschool_children: 0,
            age: 30,
            resident: true,
            contributions: TwContributions::default(),
        }
    }
}

impl TwInputs {
    fn voluntary_pension_limit(&self) -> Decimal {
        let wage = non_negative(self.gross_salary).min(annualize(PENSION_MONTHLY_WAGE_CAP));
        round_whole(wage * VOLUNTARY_PENSION_RATE)
    }
}

impl CountryInputs for TwInputs {
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
        ContributionLimits::new().with(
            "voluntary_pension",
            ContributionLimit::new(
                self.voluntary_pension_limit(),
                "Voluntary labour pension",
                "Employee contribution of up to 6% of wage, excluded from income",
                true,
            ),
        )
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        self.preschool_children = self.preschool_children.min(self.dependents);

        let limits = self.contribution_limits();
        enforce_limits(
            &limits,
            &mut [Election::new(
                "voluntary_pension",
                &mut self.contributions.voluntary_pension,
            )],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwBreakdown {
    pub labor_insurance: Decimal,
    pub health_insurance: Decimal,
    pub salary_special_deduction: Decimal,
    pub exemptions: Decimal,
    pub standard_deduction: Decimal,
    pub preschool_deduction: Decimal,
    pub basic_living_difference: Decimal,
    pub net_taxable_income: Decimal,
    pub income_tax: Decimal,
    pub non_resident: bool,
}

/// Calculator for Taiwan employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct TwCalculator;

impl TwCalculator {
    pub fn compute(
        &self,
        inputs: &TwInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let pension = inputs.contributions.voluntary_pension;
        let labor = self.labor_insurance(gross);
        let health = self.health_insurance(gross, inputs.dependents);

        let breakdown = if inputs.resident {
            self.resident(inputs, gross - pension, labor, health)
        } else {
            self.non_resident(gross - pension, labor, health)
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(breakdown.net_taxable_income)
            .tax("Income tax", breakdown.income_tax)
            .tax("Labour insurance", labor)
            .tax("National health insurance", health)
            .contribution("Voluntary labour pension", pension)
            .build(CountryBreakdown::Tw(breakdown))
    }

    fn labor_insurance(
        &self,
        gross: Decimal,
    ) -> Decimal {
        let wage = monthly(gross).min(LABOR_INSURANCE_MONTHLY_CAP);
        annualize(round_whole(wage * LABOR_INSURANCE_RATE))
    }

    /// Employee premium, charged again for each insured dependent up to three.
    fn health_insurance(
        &self,
        gross: Decimal,
        dependents: u8,
    ) -> Decimal {
        let wage = monthly(gross).min(NHI_MONTHLY_CAP);
        let per_head = round_whole(wage * NHI_RATE * NHI_EMPLOYEE_SHARE);
        let heads = Decimal::from(1 + dependents.min(NHI_MAX_DEPENDENTS));
        annualize(per_head * heads)
    }

    fn resident(
        &self,
        inputs: &TwInputs,
        salary: Decimal,
        labor: Decimal,
        health: Decimal,
    ) -> TwBreakdown {
        let married = inputs.marital_status.is_married();
        let special = salary.min(SALARY_SPECIAL_DEDUCTION);

        let own = if inputs.age >= SENIOR_AGE {
            SENIOR_EXEMPTION
        } else {
            EXEMPTION
        };
        let others = u32::from(married) + u32::from(inputs.dependents);
        let exemptions = own + EXEMPTION * Decimal::from(others);

        let standard = if married {
            STANDARD_DEDUCTION_MARRIED
        } else {
            STANDARD_DEDUCTION_SINGLE
        };
        let preschool = self.preschool_deduction(inputs.preschool_children);

        let persons = Decimal::from(1 + others);
        let basic_living =
            non_negative(BASIC_LIVING_EXPENSE * persons - (exemptions + standard + preschool));

        let net_taxable = non_negative(
            salary - special - exemptions - standard - preschool - basic_living,
        );
        let income_tax = round_whole(progressive_tax(net_taxable, &BRACKETS));

        TwBreakdown {
            labor_insurance: labor,
            health_insurance: health,
            salary_special_deduction: special,
            exemptions,
            standard_deduction: standard,
            preschool_deduction: preschool,
            basic_living_difference: basic_living,
            net_taxable_income: net_taxable,
            income_tax,
            non_resident: false,
        }
    }

    fn preschool_deduction(
        &self,
        children: u8,
    ) -> Decimal {
        match children {
            0 => Decimal::ZERO,
            n => PRESCHOOL_FIRST_CHILD + PRESCHOOL_LATER_CHILD * Decimal::from(n - 1),
        }
    }

    /// Flat withholding on gross salary; the low rate applies to small wages.
    fn non_resident(
        &self,
        salary: Decimal,
        labor: Decimal,
        health: Decimal,
    ) -> TwBreakdown {
        let rate = if monthly(salary) <= NON_RESIDENT_LOW_WAGE_THRESHOLD {
            NON_RESIDENT_LOW_WAGE_RATE
        } else {
            NON_RESIDENT_RATE
        };
        TwBreakdown {
            labor_insurance: labor,
            health_insurance: health,
            net_taxable_income: salary,
            income_tax: round_whole(salary * rate),
            non_resident: true,
            ..TwBreakdown::default()
        }
    }
}

impl SalaryCalculator for TwCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Tw
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Tw(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Tw, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::validate_brackets;

    fn inputs(gross: Decimal) -> TwInputs {
        TwInputs {
            gross_salary: gross,
            ..TwInputs::default()
        }
    }

    fn breakdown(result: &CalculationResult) -> &TwBreakdown {
        match &result.breakdown {
            CountryBreakdown::Tw(breakdown) => breakdown,
            other => panic!("expected a Taiwan breakdown, got {other:?}"),
        }
    }

    // =========================================================================
    // Social insurance
    // =========================================================================

    #[test]
    fn labor_insurance_caps_monthly_wage() {
        assert_eq!(TwCalculator.labor_insurance(dec!(1_200_000)), dec!(13_740));
        assert_eq!(TwCalculator.labor_insurance(dec!(360_000)), dec!(9_000));
    }

    #[test]
    fn health_insurance_counts_at_most_three_dependents() {
        let calc = TwCalculator;

        assert_eq!(calc.health_insurance(dec!(1_200_000), 0), dec!(18_612));
        assert_eq!(calc.health_insurance(dec!(1_200_000), 5), dec!(74_448));
    }

    // =========================================================================
    // Resident tax
    // =========================================================================

    #[test]
    fn single_resident_at_1_2m() {
        let result = TwCalculator.compute(&inputs(dec!(1_200_000)));
        let detail = breakdown(&result);

        assert_eq!(detail.net_taxable_income, dec!(754_000));
        assert_eq!(detail.income_tax, dec!(49_180));
        assert_eq!(result.net_salary, dec!(1_118_468));
    }

    #[test]
    fn young_family_owes_no_tax() {
        let mut family = inputs(dec!(1_200_000));
        family.marital_status = MaritalStatus::Married;
        family.dependents = 2;
        family.preschool_children = 2;

        let result = TwCalculator.compute(&family);
        let detail = breakdown(&result);

        assert_eq!(detail.preschool_deduction, dec!(375_000));
        assert_eq!(detail.income_tax, dec!(0));
    }

    #[test]
    fn basic_living_difference_fills_the_gap() {
        let mut household = inputs(dec!(1_200_000));
        household.dependents = 3;

        let result = TwCalculator.compute(&household);
        let detail = breakdown(&result);

        assert_eq!(detail.basic_living_difference, dec!(321_000));
        assert_eq!(detail.net_taxable_income, dec!(142_000));
        assert_eq!(detail.income_tax, dec!(7_100));
    }

    #[test]
    fn seniors_get_a_larger_exemption() {
        let mut senior = inputs(dec!(1_200_000));
        senior.age = 70;

        let result = TwCalculator.compute(&senior);

        assert_eq!(breakdown(&result).exemptions, dec!(145_500));
    }

    #[test]
    fn voluntary_pension_is_excluded_from_income() {
        let mut saver = inputs(dec!(1_200_000));
        saver.contributions.voluntary_pension = dec!(72_000);

        let result = TwCalculator.compute(&saver);

        assert_eq!(breakdown(&result).net_taxable_income, dec!(682_000));
        assert_eq!(result.contribution_amount("Voluntary labour pension"), dec!(72_000));
    }

    // =========================================================================
    // Non-residents and normalization
    // =========================================================================

    #[test]
    fn non_resident_flat_rates() {
        let mut expat = inputs(dec!(1_200_000));
        expat.resident = false;
        let mut low_wage = inputs(dec!(480_000));
        low_wage.resident = false;

        assert_eq!(breakdown(&TwCalculator.compute(&expat)).income_tax, dec!(216_000));
        assert_eq!(breakdown(&TwCalculator.compute(&low_wage)).income_tax, dec!(28_800));
    }

    #[test]
    fn normalization_caps_pension_and_preschool_children() {
        let mut raw = inputs(dec!(1_200_000));
        raw.contributions.voluntary_pension = dec!(100_000);
        raw.dependents = 1;
        raw.preschool_children = 2;

        let normalized = raw.normalized();

        assert_eq!(normalized.contributions.voluntary_pension, dec!(72_000));
        assert_eq!(normalized.preschool_children, 1);
    }

    #[test]
    fn bracket_schedule_is_well_formed() {
        assert_eq!(validate_brackets(&BRACKETS), Ok(()));
    }
}

//! Switzerland: direct federal tax, cantonal and communal income tax, and
//! employee social insurance (AHV/IV/EO, ALV, BVG).
//!
//! Cantonal tax is the basic tariff times the combined canton and commune
//! multiplier for the capital commune. Taxable incomes are assessed in
//! steps of 100 francs; amounts round to the cent.

mod cantons;
mod tables;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use self::cantons::{CantonRules, MarriedTariff, rules_for};
use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{floor_to, non_negative, round_half_up};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, MaritalStatus, PayFrequency,
};

pub use self::cantons::{CANTONS, REGIONS};
pub use self::tables::{FEDERAL_MARRIED, FEDERAL_SINGLE};

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Ch,
    name: "Switzerland",
    currency: "CHF",
    tax_year: "2025",
    last_updated: "2025-01-01",
    supports_filing_status: true,
    supports_regions: true,
    default_region: Some("ZH"),
    regions: &REGIONS,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChContributions {
    pub pillar_3a: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    pub canton: String,
    pub marital_status: MaritalStatus,
    pub children: u8,
    /// Sets the BVG age credit.
    pub age: u8,
    pub contributions: ChContributions,
}

impl Default for ChInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(100_000),
            pay_frequency: PayFrequency::Monthly,
            canton: "ZH".to_string(),
            marital_status: MaritalStatus::Single,
            children: 0,
            age: 35,
            contributions: ChContributions::default(),
        }
    }
}

impl ChInputs {
    /// Employees below the BVG entry threshold have no pension fund and get
    /// the larger pillar 3a allowance.
    fn pillar_3a_limit(&self) -> Decimal {
        let gross = non_negative(self.gross_salary);
        if gross < BVG_ENTRY_THRESHOLD {
            round_half_up(gross * PILLAR_3A_RATE_WITHOUT_BVG).min(PILLAR_3A_LIMIT_WITHOUT_BVG)
        } else {
            PILLAR_3A_LIMIT
        }
    }
}

impl CountryInputs for ChInputs {
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
        Some(self.canton.clone())
    }

    fn set_region(
        &mut self,
        region: &str,
    ) -> bool {
        match rules_for(region) {
            Some(rules) => {
                self.canton = rules.code.to_string();
                true
            }
            None => false,
        }
    }

    fn contribution_limits(&self) -> ContributionLimits {
        ContributionLimits::new().with(
            "pillar_3a",
            ContributionLimit::new(
                self.pillar_3a_limit(),
                "Pillar 3a",
                "Tied private pension, deductible from income",
                true,
            ),
        )
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        self.canton = self.canton.trim().to_ascii_uppercase();
        let limits = self.contribution_limits();
        enforce_limits(
            &limits,
            &mut [Election::new("pillar_3a", &mut self.contributions.pillar_3a)],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChBreakdown {
    pub ahv: Decimal,
    pub alv: Decimal,
    pub coordinated_salary: Decimal,
    pub bvg: Decimal,
    pub professional_expenses: Decimal,
    pub federal_taxable_income: Decimal,
    pub federal_tax: Decimal,
    pub cantonal_taxable_income: Decimal,
    pub cantonal_basic_tax: Decimal,
    pub cantonal_tax: Decimal,
    pub head_tax: Decimal,
}

/// Calculator for Swiss employees taxed by assessment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChCalculator;

impl ChCalculator {
    pub fn compute(
        &self,
        inputs: &ChInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let married = inputs.marital_status.is_married();
        let children = Decimal::from(inputs.children);
        let pillar_3a = inputs.contributions.pillar_3a;

        let ahv = round_half_up(gross * AHV_RATE);
        let alv = round_half_up(gross.min(ALV_CEILING) * ALV_RATE);
        let coordinated = self.coordinated_salary(gross);
        let bvg = round_half_up(coordinated * self.age_credit(inputs.age) / Decimal::TWO);
        let social = ahv + alv + bvg;

        let professional = round_half_up(
            ((gross - social) * PROFESSIONAL_EXPENSE_RATE)
                .max(PROFESSIONAL_EXPENSE_MIN)
                .min(PROFESSIONAL_EXPENSE_MAX),
        );
        let insurance = if married {
            INSURANCE_DEDUCTION_MARRIED
        } else {
            INSURANCE_DEDUCTION_SINGLE
        } + INSURANCE_DEDUCTION_PER_CHILD * children;
        let common = social + pillar_3a + professional + insurance;

        let married_deduction = if married {
            FEDERAL_MARRIED_DEDUCTION
        } else {
            Decimal::ZERO
        };
        let federal_taxable = self.assessed(
            gross - common - FEDERAL_CHILD_DEDUCTION * children - married_deduction,
        );
        let family_tariff = married || inputs.children > 0;
        let federal_tax = self.federal_tax(federal_taxable, family_tariff, children);

        let (cantonal_taxable, basic, cantonal_tax, head_tax) = match rules_for(&inputs.canton) {
            Some(rules) => {
                let taxable = self.assessed(gross - common - rules.child_deduction * children);
                let basic = self.cantonal_basic_tax(rules, taxable, married);
                let tax = round_half_up(
                    basic * (Decimal::ONE - rules.basic_reduction) * rules.multiplier,
                );
                let adults = if married { Decimal::TWO } else { Decimal::ONE };
                (taxable, basic, tax, rules.head_tax * adults)
            }
            None => {
                warn!(canton = %inputs.canton, "unknown canton, no cantonal tax applied");
                Default::default()
            }
        };

        // Capped at whatever income the other levies leave.
        let head_tax = head_tax.min(non_negative(gross - social - federal_tax - cantonal_tax));

        let breakdown = ChBreakdown {
            ahv,
            alv,
            coordinated_salary: coordinated,
            bvg,
            professional_expenses: professional,
            federal_taxable_income: federal_taxable,
            federal_tax,
            cantonal_taxable_income: cantonal_taxable,
            cantonal_basic_tax: basic,
            cantonal_tax,
            head_tax,
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(federal_taxable)
            .tax("Federal income tax", federal_tax)
            .tax("Cantonal and communal tax", cantonal_tax)
            .tax_if_any("Head tax", head_tax)
            .tax("AHV/IV/EO", ahv)
            .tax("ALV", alv)
            .tax_if_any("BVG", bvg)
            .contribution("Pillar 3a", pillar_3a)
            .build(CountryBreakdown::Ch(breakdown))
    }

    fn assessed(
        &self,
        income: Decimal,
    ) -> Decimal {
        floor_to(non_negative(income), ASSESSMENT_STEP)
    }

    fn coordinated_salary(
        &self,
        gross: Decimal,
    ) -> Decimal {
        if gross < BVG_ENTRY_THRESHOLD {
            return Decimal::ZERO;
        }
        (gross.min(BVG_MAX_INSURED) - BVG_COORDINATION_DEDUCTION).max(BVG_MIN_COORDINATED)
    }

    fn age_credit(
        &self,
        age: u8,
    ) -> Decimal {
        BVG_AGE_CREDITS
            .iter()
            .find(|(from, to, _)| (*from..=*to).contains(&age))
            .map_or(Decimal::ZERO, |(_, _, credit)| *credit)
    }

    /// Married couples and single parents use the family tariff; every child
    /// then earns a credit against the tax.
    fn federal_tax(
        &self,
        taxable: Decimal,
        family_tariff: bool,
        children: Decimal,
    ) -> Decimal {
        let (brackets, flat_from): (&[_], _) = if family_tariff {
            (&FEDERAL_MARRIED[..], FEDERAL_FLAT_FROM_MARRIED)
        } else {
            (&FEDERAL_SINGLE[..], FEDERAL_FLAT_FROM_SINGLE)
        };
        let tax = if taxable >= flat_from {
            taxable * FEDERAL_FLAT_RATE
        } else {
            progressive_tax(taxable, brackets)
        };
        non_negative(round_half_up(tax) - FEDERAL_CHILD_CREDIT * children)
    }

    fn cantonal_basic_tax(
        &self,
        rules: &CantonRules,
        taxable: Decimal,
        married: bool,
    ) -> Decimal {
        let tax = match (married, rules.married) {
            (true, MarriedTariff::Separate(brackets)) => progressive_tax(taxable, brackets),
            (true, MarriedTariff::Splitting(divisor)) if divisor > Decimal::ZERO => {
                progressive_tax(taxable / divisor, rules.single) * divisor
            }
            _ => progressive_tax(taxable, rules.single),
        };
        round_half_up(tax)
    }
}

impl SalaryCalculator for ChCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Ch
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Ch(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Ch, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::validate_brackets;

    fn inputs(
        gross: Decimal,
        canton: &str,
    ) -> ChInputs {
        ChInputs {
            gross_salary: gross,
            canton: canton.to_string(),
            ..ChInputs::default()
        }
    }

    fn breakdown(result: &CalculationResult) -> &ChBreakdown {
        match &result.breakdown {
            CountryBreakdown::Ch(breakdown) => breakdown,
            other => panic!("expected a Swiss breakdown, got {other:?}"),
        }
    }

    // =========================================================================
    // Tables
    // =========================================================================

    #[test]
    fn tariffs_are_well_formed() {
        assert_eq!(validate_brackets(&FEDERAL_SINGLE), Ok(()));
        assert_eq!(validate_brackets(&FEDERAL_MARRIED), Ok(()));
        for canton in &CANTONS {
            assert_eq!(validate_brackets(canton.single), Ok(()), "{}", canton.code);
            if let MarriedTariff::Separate(brackets) = canton.married {
                assert_eq!(validate_brackets(brackets), Ok(()), "{}", canton.code);
            }
        }
    }

    // =========================================================================
    // Social insurance
    // =========================================================================

    #[test]
    fn bvg_uses_coordinated_salary_and_age_credit() {
        let calc = ChCalculator;

        assert_eq!(calc.coordinated_salary(dec!(20_000)), dec!(0));
        assert_eq!(calc.coordinated_salary(dec!(25_000)), dec!(3_780));
        assert_eq!(calc.coordinated_salary(dec!(200_000)), dec!(64_260));
        assert_eq!(calc.age_credit(24), dec!(0));
        assert_eq!(calc.age_credit(35), dec!(0.10));
        assert_eq!(calc.age_credit(66), dec!(0));
    }

    #[test]
    fn young_employee_gets_lower_bvg_credit() {
        let mut young = inputs(dec!(60_000), "ZH");
        young.age = 28;

        let result = ChCalculator.compute(&young);
        let detail = breakdown(&result);

        assert_eq!(detail.bvg, dec!(1_173.90));
        assert_eq!(detail.professional_expenses, dec!(2_000));
        assert_eq!(result.net_salary, dec!(49_849.36));
    }

    // =========================================================================
    // Income tax
    // =========================================================================

    #[test]
    fn zurich_single_at_100k() {
        let result = ChCalculator.compute(&inputs(dec!(100_000), "ZH"));
        let detail = breakdown(&result);

        assert_eq!(detail.bvg, dec!(3_213.00));
        assert_eq!(detail.federal_taxable_income, dec!(85_800));
        assert_eq!(detail.federal_tax, dec!(1_750.87));
        assert_eq!(detail.cantonal_basic_tax, dec!(5_012.00));
        assert_eq!(detail.cantonal_tax, dec!(10_876.04));
        assert_eq!(result.net_salary, dec!(77_736.09));
    }

    #[test]
    fn zug_and_geneva_at_100k() {
        let zug = ChCalculator.compute(&inputs(dec!(100_000), "ZG"));
        let geneva = ChCalculator.compute(&inputs(dec!(100_000), "GE"));

        assert_eq!(breakdown(&zug).cantonal_tax, dec!(5_779.62));
        assert_eq!(zug.net_salary, dec!(82_856.51));
        assert_eq!(breakdown(&geneva).cantonal_basic_tax, dec!(9_221.68));
        assert_eq!(breakdown(&geneva).cantonal_tax, dec!(15_662.10));
        assert_eq!(geneva.tax_amount("Head tax"), dec!(25));
    }

    #[test]
    fn married_couple_with_children_in_zurich() {
        let mut family = inputs(dec!(150_000), "ZH");
        family.marital_status = MaritalStatus::Married;
        family.children = 2;

        let result = ChCalculator.compute(&family);
        let detail = breakdown(&result);

        assert_eq!(detail.federal_taxable_income, dec!(111_800));
        assert_eq!(detail.federal_tax, dec!(1_912.00));
        assert_eq!(detail.cantonal_taxable_income, dec!(109_600));
        assert_eq!(detail.cantonal_tax, dec!(12_659.78));
        assert_eq!(detail.head_tax, dec!(48));
    }

    #[test]
    fn head_tax_never_exceeds_remaining_income() {
        let result = ChCalculator.compute(&inputs(dec!(1), "ZH"));

        // 1.00 - 0.05 AHV - 0.01 ALV leaves 0.94 of the 24 franc head tax
        assert_eq!(breakdown(&result).head_tax, dec!(0.94));
        assert_eq!(result.total_tax, dec!(1));
        assert_eq!(result.net_salary, Decimal::ZERO);

        let zero = ChCalculator.compute(&inputs(Decimal::ZERO, "ZH"));
        assert_eq!(zero.total_tax, Decimal::ZERO);
    }

    #[test]
    fn single_parent_uses_family_tariff() {
        let single = ChCalculator.compute(&inputs(dec!(100_000), "ZH"));
        let mut parent = inputs(dec!(100_000), "ZH");
        parent.children = 1;

        let with_child = ChCalculator.compute(&parent);

        assert!(breakdown(&with_child).federal_tax < breakdown(&single).federal_tax);
    }

    #[test]
    fn top_incomes_pay_the_flat_federal_rate() {
        let result = ChCalculator.compute(&inputs(dec!(900_000), "ZH"));

        assert_eq!(breakdown(&result).federal_taxable_income, dec!(841_600));
        assert_eq!(breakdown(&result).federal_tax, dec!(96_784.00));
    }

    #[test]
    fn pillar_3a_reduces_both_tax_bases() {
        let mut saver = inputs(dec!(100_000), "ZH");
        saver.contributions.pillar_3a = dec!(7_258);

        let result = ChCalculator.compute(&saver);
        let detail = breakdown(&result);

        assert_eq!(detail.federal_taxable_income, dec!(78_600));
        assert_eq!(detail.cantonal_tax, dec!(9_469.88));
        assert_eq!(result.net_salary, dec!(72_337.01));
    }

    // =========================================================================
    // Normalization
    // =========================================================================

    #[test]
    fn pillar_3a_limit_depends_on_pension_fund() {
        let mut employee = inputs(dec!(100_000), "zh");
        employee.contributions.pillar_3a = dec!(10_000);
        let mut part_timer = inputs(dec!(20_000), "ZH");
        part_timer.contributions.pillar_3a = dec!(10_000);

        let employee = employee.normalized();

        assert_eq!(employee.contributions.pillar_3a, dec!(7_258));
        assert_eq!(employee.canton, "ZH");
        assert_eq!(part_timer.normalized().contributions.pillar_3a, dec!(4_000.00));
    }

    #[test]
    fn unknown_canton_skips_cantonal_tax() {
        let result = ChCalculator.compute(&inputs(dec!(100_000), "BE"));

        assert_eq!(breakdown(&result).cantonal_tax, dec!(0));
        assert_eq!(result.tax_amount("Federal income tax"), dec!(1_750.87));
    }
}

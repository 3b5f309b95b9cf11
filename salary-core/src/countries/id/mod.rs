//! Indonesia, PPh 21 on annual employment income.
//!
//! Contributions and the job-expense deduction round to the whole rupiah.
//! PKP is floored to the thousand before the Article 17 rates apply.

mod tables;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{
    floor_to, monthly_capped_contribution, non_negative, round_whole,
};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, MaritalStatus, PayFrequency,
};

pub use self::tables::BRACKETS;

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Id,
    name: "Indonesia",
    currency: "IDR",
    tax_year: "2025",
    last_updated: "2025-01-15",
    supports_filing_status: true,
    supports_regions: false,
    default_region: None,
    regions: &[],
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdContributions {
    /// Zakat paid through an officially recognised body.
    pub zakat: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    pub marital_status: MaritalStatus,
    /// Dependents counted for PTKP; at most three qualify.
    pub dependents: u8,
    pub has_npwp: bool,
    pub contributions: IdContributions,
}

impl Default for IdInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(180_000_000),
            pay_frequency: PayFrequency::Monthly,
            marital_status: MaritalStatus::Single,
            dependents: 0,
            has_npwp: true,
            contributions: IdContributions::default(),
        }
    }
}

impl CountryInputs for IdInputs {
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
            "zakat",
            ContributionLimit::new(
                round_whole(non_negative(self.gross_salary) * ZAKAT_RATE_CAP),
                "Zakat",
                "Deductible up to 2.5% of gross income",
                true,
            ),
        )
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        self.dependents = self.dependents.min(MAX_DEPENDENTS);
        let limits = self.contribution_limits();
        enforce_limits(
            &limits,
            &mut [Election::new("zakat", &mut self.contributions.zakat)],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdBreakdown {
    pub job_expense: Decimal,
    pub jht: Decimal,
    pub jp: Decimal,
    pub kesehatan: Decimal,
    pub zakat: Decimal,
    pub net_income: Decimal,
    pub ptkp: Decimal,
    pub pkp: Decimal,
    pub income_tax: Decimal,
    /// Part of `income_tax` added because no NPWP was registered.
    pub npwp_surcharge: Decimal,
}

/// Calculator for Indonesian employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdCalculator;

impl IdCalculator {
    pub fn compute(
        &self,
        inputs: &IdInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);

        let job_expense = self.job_expense(gross);
        let jht = round_whole(gross * JHT_RATE);
        let jp = round_whole(monthly_capped_contribution(gross, JP_RATE, JP_MONTHLY_CAP));
        let kesehatan = round_whole(monthly_capped_contribution(
            gross,
            KESEHATAN_RATE,
            KESEHATAN_MONTHLY_CAP,
        ));
        let zakat = inputs.contributions.zakat;

        let net_income = non_negative(gross - job_expense - jht - jp - zakat);
        let ptkp = self.ptkp(inputs);
        let pkp = floor_to(non_negative(net_income - ptkp), PKP_ROUNDING);

        let base_tax = round_whole(progressive_tax(pkp, &BRACKETS));
        let income_tax = if inputs.has_npwp {
            base_tax
        } else {
            round_whole(base_tax * NO_NPWP_UPLIFT)
        };

        let breakdown = IdBreakdown {
            job_expense,
            jht,
            jp,
            kesehatan,
            zakat,
            net_income,
            ptkp,
            pkp,
            income_tax,
            npwp_surcharge: income_tax - base_tax,
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(pkp)
            .tax("PPh 21", income_tax)
            .tax("BPJS JHT", jht)
            .tax("BPJS JP", jp)
            .tax("BPJS Kesehatan", kesehatan)
            .contribution("Zakat", zakat)
            .build(CountryBreakdown::Id(breakdown))
    }

    fn job_expense(
        &self,
        gross: Decimal,
    ) -> Decimal {
        round_whole(gross * JOB_EXPENSE_RATE).min(JOB_EXPENSE_CAP)
    }

    fn ptkp(
        &self,
        inputs: &IdInputs,
    ) -> Decimal {
        let married = if inputs.marital_status.is_married() {
            PTKP_MARRIED
        } else {
            Decimal::ZERO
        };
        let dependents = Decimal::from(inputs.dependents.min(MAX_DEPENDENTS));
        PTKP_PERSONAL + married + PTKP_PER_DEPENDENT * dependents
    }
}

impl SalaryCalculator for IdCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Id
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Id(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Id, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::validate_brackets;
    use crate::countries::sg::SgInputs;

    fn inputs(gross: Decimal) -> IdInputs {
        IdInputs {
            gross_salary: gross,
            pay_frequency: PayFrequency::Annual,
            ..IdInputs::default()
        }
    }

    // =========================================================================
    // Deductions
    // =========================================================================

    #[test]
    fn job_expense_is_capped() {
        let calc = IdCalculator;

        assert_eq!(calc.job_expense(dec!(100_000_000)), dec!(5_000_000));
        assert_eq!(calc.job_expense(dec!(150_000_000)), dec!(6_000_000));
    }

    #[test]
    fn ptkp_counts_spouse_and_dependents() {
        let calc = IdCalculator;
        let mut married = inputs(dec!(0));
        married.marital_status = MaritalStatus::Married;
        married.dependents = 2;

        assert_eq!(calc.ptkp(&inputs(dec!(0))), dec!(54_000_000));
        assert_eq!(calc.ptkp(&married), dec!(67_500_000));
    }

    // =========================================================================
    // Full calculation
    // =========================================================================

    #[test]
    fn single_without_dependents_at_120_million() {
        let result = IdCalculator.compute(&inputs(dec!(120_000_000)));
        let CountryBreakdown::Id(breakdown) = &result.breakdown else {
            panic!("expected an Indonesian breakdown");
        };

        assert_eq!(breakdown.job_expense, dec!(6_000_000));
        assert_eq!(breakdown.jht, dec!(2_400_000));
        assert_eq!(breakdown.jp, dec!(1_200_000));
        assert_eq!(breakdown.net_income, dec!(110_400_000));
        assert_eq!(result.taxable_income, dec!(56_400_000));
        assert_eq!(breakdown.income_tax, dec!(2_820_000));
        assert_eq!(breakdown.kesehatan, dec!(1_200_000));
        assert_eq!(result.total_tax, dec!(7_620_000));
        assert_eq!(result.net_salary, dec!(112_380_000));
    }

    #[test]
    fn married_with_two_dependents() {
        let mut married = inputs(dec!(120_000_000));
        married.marital_status = MaritalStatus::Married;
        married.dependents = 2;

        let result = IdCalculator.compute(&married);

        // (110.4M - 67.5M) * 5%
        assert_eq!(result.taxable_income, dec!(42_900_000));
        assert_eq!(result.tax_amount("PPh 21"), dec!(2_145_000));
    }

    #[test]
    fn pension_and_health_ceilings_apply_monthly() {
        let result = IdCalculator.compute(&inputs(dec!(240_000_000)));

        assert_eq!(result.tax_amount("BPJS JP"), dec!(1_265_688));
        assert_eq!(result.tax_amount("BPJS Kesehatan"), dec!(1_440_000));
        // 240M - 6M - 4.8M - 1,265,688 - 54M, floored to the thousand
        assert_eq!(result.taxable_income, dec!(173_934_000));
        assert_eq!(result.tax_amount("PPh 21"), dec!(20_090_100));
    }

    #[test]
    fn missing_npwp_adds_twenty_percent() {
        let mut no_npwp = inputs(dec!(120_000_000));
        no_npwp.has_npwp = false;

        let result = IdCalculator.compute(&no_npwp);
        let CountryBreakdown::Id(breakdown) = &result.breakdown else {
            panic!("expected an Indonesian breakdown");
        };

        assert_eq!(breakdown.income_tax, dec!(3_384_000));
        assert_eq!(breakdown.npwp_surcharge, dec!(564_000));
    }

    #[test]
    fn zakat_reduces_taxable_income_and_net() {
        let mut with_zakat = inputs(dec!(120_000_000));
        with_zakat.contributions.zakat = dec!(2_400_000);

        let result = IdCalculator.compute(&with_zakat);

        assert_eq!(result.taxable_income, dec!(54_000_000));
        assert_eq!(result.contribution_amount("Zakat"), dec!(2_400_000));
        assert_eq!(
            result.net_salary + result.total_deductions,
            result.gross_salary
        );
    }

    #[test]
    fn zero_salary_owes_nothing() {
        let result = IdCalculator.compute(&inputs(dec!(0)));

        assert_eq!(result.net_salary, dec!(0));
        assert_eq!(result.effective_tax_rate, dec!(0));
    }

    // =========================================================================
    // Normalization and dispatch
    // =========================================================================

    #[test]
    fn normalization_caps_dependents_and_zakat() {
        let mut raw = inputs(dec!(100_000_000));
        raw.dependents = 5;
        raw.contributions.zakat = dec!(10_000_000);

        let normalized = raw.normalized();

        assert_eq!(normalized.dependents, 3);
        assert_eq!(normalized.contributions.zakat, dec!(2_500_000));
    }

    #[test]
    fn rejects_inputs_for_another_country() {
        let result = IdCalculator.calculate(&CalculatorInputs::Sg(SgInputs::default()));

        assert_eq!(
            result,
            Err(CalculatorError::InvalidCountryInput {
                expected: CountryCode::Id,
                actual: CountryCode::Sg,
            })
        );
    }

    #[test]
    fn bracket_schedule_is_well_formed() {
        assert_eq!(validate_brackets(&BRACKETS), Ok(()));
    }
}

//! Netherlands, box 1 income tax on employment income.
//!
//! Taxable income, tax and credits are floored to the euro.

mod tables;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{floor_whole, non_negative};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, PayFrequency, TaxBracket,
};

pub use self::tables::{BOX1_BRACKETS, BOX1_BRACKETS_AOW};

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Nl,
    name: "Netherlands",
    currency: "EUR",
    tax_year: "2025",
    last_updated: "2025-01-06",
    supports_filing_status: false,
    supports_regions: false,
    default_region: None,
    regions: &[],
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NlContributions {
    /// Pre-tax pension saving within the annual room.
    pub pension: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NlInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    pub above_aow_age: bool,
    pub thirty_percent_ruling: bool,
    pub contributions: NlContributions,
}

impl Default for NlInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(60_000),
            pay_frequency: PayFrequency::Monthly,
            above_aow_age: false,
            thirty_percent_ruling: false,
            contributions: NlContributions::default(),
        }
    }
}

impl CountryInputs for NlInputs {
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
        let room = (PENSION_ROOM_RATE * non_negative(self.gross_salary - PENSION_ROOM_FRANCHISE))
            .min(PENSION_ROOM_MAX);
        ContributionLimits::new().with(
            "pension",
            ContributionLimit::new(
                floor_whole(room),
                "Pension (jaarruimte)",
                "Deductible pension saving within the annual room",
                true,
            ),
        )
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        let limits = self.contribution_limits();
        enforce_limits(
            &limits,
            &mut [Election::new("pension", &mut self.contributions.pension)],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NlBreakdown {
    pub thirty_percent_exemption: Decimal,
    pub pension: Decimal,
    pub taxable_income: Decimal,
    pub bracket_tax: Decimal,
    pub general_tax_credit: Decimal,
    pub labour_tax_credit: Decimal,
    pub income_tax: Decimal,
}

/// Calculator for Dutch employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct NlCalculator;

impl NlCalculator {
    pub fn compute(
        &self,
        inputs: &NlInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let exemption = if inputs.thirty_percent_ruling {
            self.thirty_percent_exemption(gross)
        } else {
            Decimal::ZERO
        };
        let pension = inputs.contributions.pension;
        let taxable = floor_whole(non_negative(gross - exemption - pension));

        let brackets: &[TaxBracket] = if inputs.above_aow_age {
            &BOX1_BRACKETS_AOW
        } else {
            &BOX1_BRACKETS
        };
        let bracket_tax = floor_whole(progressive_tax(taxable, brackets));

        let general = self.general_tax_credit(taxable, inputs.above_aow_age).min(bracket_tax);
        let labour = self
            .labour_tax_credit(taxable, inputs.above_aow_age)
            .min(bracket_tax - general);
        let income_tax = bracket_tax - general - labour;

        let breakdown = NlBreakdown {
            thirty_percent_exemption: exemption,
            pension,
            taxable_income: taxable,
            bracket_tax,
            general_tax_credit: general,
            labour_tax_credit: labour,
            income_tax,
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(taxable)
            .tax("Income tax", income_tax)
            .contribution("Pension", pension)
            .build(CountryBreakdown::Nl(breakdown))
    }

    /// 30% of salary, keeping the taxable part at the norm and within the cap.
    fn thirty_percent_exemption(
        &self,
        gross: Decimal,
    ) -> Decimal {
        (gross * THIRTY_PERCENT_RATE)
            .min(non_negative(gross - THIRTY_PERCENT_SALARY_NORM))
            .min(THIRTY_PERCENT_SALARY_CAP * THIRTY_PERCENT_RATE)
    }

    fn general_tax_credit(
        &self,
        income: Decimal,
        aow: bool,
    ) -> Decimal {
        let (max, rate) = if aow {
            (GENERAL_CREDIT_MAX_AOW, GENERAL_CREDIT_PHASE_OUT_RATE_AOW)
        } else {
            (GENERAL_CREDIT_MAX, GENERAL_CREDIT_PHASE_OUT_RATE)
        };
        floor_whole(non_negative(
            max - rate * non_negative(income - GENERAL_CREDIT_PHASE_OUT_START),
        ))
    }

    fn labour_tax_credit(
        &self,
        income: Decimal,
        aow: bool,
    ) -> Decimal {
        if income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let Some((from, base, rate)) = LABOUR_CREDIT
            .iter()
            .rev()
            .find(|(from, _, _)| income > *from)
            .copied()
        else {
            return Decimal::ZERO;
        };
        let credit = non_negative(base + (income - from) * rate);
        let credit = if aow {
            credit * LABOUR_CREDIT_AOW_FACTOR
        } else {
            credit
        };
        floor_whole(credit)
    }
}

impl SalaryCalculator for NlCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Nl
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Nl(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Nl, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::validate_brackets;

    fn inputs(gross: Decimal) -> NlInputs {
        NlInputs {
            gross_salary: gross,
            pay_frequency: PayFrequency::Annual,
            ..NlInputs::default()
        }
    }

    #[test]
    fn credits_phase_with_income() {
        let calc = NlCalculator;

        assert_eq!(calc.general_tax_credit(dec!(20_000), false), dec!(3_068));
        assert_eq!(calc.general_tax_credit(dec!(60_000), false), dec!(1_065));
        assert_eq!(calc.general_tax_credit(dec!(80_000), false), dec!(0));
        assert_eq!(calc.labour_tax_credit(dec!(60_000), false), dec!(4_496));
        assert_eq!(calc.labour_tax_credit(dec!(150_000), false), dec!(0));
    }

    #[test]
    fn employee_at_60k() {
        let result = NlCalculator.compute(&inputs(dec!(60_000)));

        assert_eq!(result.tax_amount("Income tax"), dec!(16_288));
        assert_eq!(result.net_salary, dec!(43_712));
    }

    #[test]
    fn thirty_percent_ruling_exempts_part_of_salary() {
        let mut expat = inputs(dec!(100_000));
        expat.thirty_percent_ruling = true;

        let result = NlCalculator.compute(&expat);

        assert_eq!(result.taxable_income, dec!(70_000));
        assert_eq!(result.tax_amount("Income tax"), dec!(21_320));
    }

    #[test]
    fn thirty_percent_ruling_respects_salary_norm_and_cap() {
        let calc = NlCalculator;

        assert_eq!(calc.thirty_percent_exemption(dec!(60_000)), dec!(13_340));
        assert_eq!(calc.thirty_percent_exemption(dec!(400_000)), dec!(73_800));
    }

    #[test]
    fn aow_age_lowers_first_bracket() {
        let mut retiree = inputs(dec!(30_000));
        retiree.above_aow_age = true;

        let result = NlCalculator.compute(&retiree);

        // 30,000 * 17.92% = 5,376; general credit 1,485; labour credit halved 2,651
        assert_eq!(result.tax_amount("Income tax"), dec!(1_240));
    }

    #[test]
    fn pension_is_bounded_by_annual_room() {
        let mut saver = inputs(dec!(60_000));
        saver.contributions.pension = dec!(50_000);

        let normalized = saver.normalized();

        // 30% of (60,000 - 17,545)
        assert_eq!(normalized.contributions.pension, dec!(12_736));
    }

    #[test]
    fn low_income_credits_cannot_exceed_tax() {
        let result = NlCalculator.compute(&inputs(dec!(8_000)));

        assert_eq!(result.tax_amount("Income tax"), dec!(0));
    }

    #[test]
    fn bracket_schedules_are_well_formed() {
        for schedule in [&BOX1_BRACKETS[..], &BOX1_BRACKETS_AOW[..]] {
            assert_eq!(validate_brackets(schedule), Ok(()));
        }
    }
}

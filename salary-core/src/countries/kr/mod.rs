//! South Korea, year-end settlement for a salaried worker.
//!
//! Social insurance premiums are floored to 10 won per month. National tax is
//! floored to the won and local income tax to 10 won.

mod tables;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{annualize, floor_to, floor_whole, max, monthly, non_negative};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, PayFrequency, SharedCeiling,
};

pub use self::tables::BRACKETS;

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Kr,
    name: "South Korea",
    currency: "KRW",
    tax_year: "2025",
    last_updated: "2025-07-01",
    supports_filing_status: false,
    supports_regions: false,
    default_region: None,
    regions: &[],
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KrContributions {
    /// Personal pension savings account (연금저축).
    pub pension_savings: Decimal,
    /// Individual retirement pension (IRP).
    pub irp: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KrInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    /// Spouse without income, counted for the personal deduction.
    pub spouse: bool,
    /// Children aged 8 to 20: personal deduction and child credit.
    pub children: u8,
    pub other_dependents: u8,
    pub contributions: KrContributions,
}

impl Default for KrInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(50_000_000),
            pay_frequency: PayFrequency::Monthly,
            spouse: false,
            children: 0,
            other_dependents: 0,
            contributions: KrContributions::default(),
        }
    }
}

impl CountryInputs for KrInputs {
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
                "pension_savings",
                ContributionLimit::new(
                    PENSION_SAVINGS_LIMIT,
                    "Pension savings",
                    "Creditable pension savings account contribution",
                    false,
                ),
            )
            .with(
                "irp",
                ContributionLimit::new(
                    PENSION_ACCOUNT_LIMIT,
                    "IRP",
                    "Individual retirement pension contribution",
                    false,
                ),
            )
            .with_shared(SharedCeiling::new(
                "Pension account credit",
                PENSION_ACCOUNT_LIMIT,
                &["pension_savings", "irp"],
            ))
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        let limits = self.contribution_limits();
        let c = &mut self.contributions;
        enforce_limits(
            &limits,
            &mut [
                Election::new("pension_savings", &mut c.pension_savings),
                Election::new("irp", &mut c.irp),
            ],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KrBreakdown {
    pub national_pension: Decimal,
    pub health_insurance: Decimal,
    pub long_term_care: Decimal,
    pub employment_insurance: Decimal,
    pub earned_income_deduction: Decimal,
    pub earned_income: Decimal,
    pub personal_deduction: Decimal,
    pub tax_base: Decimal,
    pub calculated_tax: Decimal,
    pub earned_income_credit: Decimal,
    pub child_credit: Decimal,
    pub pension_account_credit: Decimal,
    pub standard_credit: Decimal,
    pub income_tax: Decimal,
    pub local_income_tax: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Premiums {
    pension: Decimal,
    health: Decimal,
    long_term_care: Decimal,
    employment: Decimal,
}

/// Calculator for Korean salaried workers.
#[derive(Debug, Default, Clone, Copy)]
pub struct KrCalculator;

impl KrCalculator {
    pub fn compute(
        &self,
        inputs: &KrInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let premiums = self.premiums(gross);

        let earned_deduction = self.earned_income_deduction(gross);
        let earned_income = non_negative(gross - earned_deduction);
        let heads = 1
            + u32::from(inputs.spouse)
            + u32::from(inputs.children)
            + u32::from(inputs.other_dependents);
        let personal = PERSONAL_DEDUCTION * Decimal::from(heads);
        let insurance = premiums.health + premiums.long_term_care + premiums.employment;
        let tax_base = non_negative(earned_income - personal - premiums.pension - insurance);

        let calculated = floor_whole(progressive_tax(tax_base, &BRACKETS));
        let earned_credit = self.earned_income_credit(calculated, gross);
        let child_credit = self.child_credit(inputs.children);
        let pension_credit = self.pension_account_credit(gross, &inputs.contributions);

        let mut remaining = calculated;
        let mut take = |credit: Decimal| {
            let granted = credit.min(remaining);
            remaining -= granted;
            granted
        };
        let earned_credit = take(earned_credit);
        let child_credit = take(child_credit);
        let pension_credit = take(pension_credit);
        let standard_credit = take(STANDARD_CREDIT);
        let income_tax = remaining;
        let local_income_tax = floor_to(income_tax * LOCAL_INCOME_TAX_RATE, PREMIUM_ROUNDING);

        let breakdown = KrBreakdown {
            national_pension: premiums.pension,
            health_insurance: premiums.health,
            long_term_care: premiums.long_term_care,
            employment_insurance: premiums.employment,
            earned_income_deduction: earned_deduction,
            earned_income,
            personal_deduction: personal,
            tax_base,
            calculated_tax: calculated,
            earned_income_credit: earned_credit,
            child_credit,
            pension_account_credit: pension_credit,
            standard_credit,
            income_tax,
            local_income_tax,
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(tax_base)
            .tax("Income tax", income_tax)
            .tax("Local income tax", local_income_tax)
            .tax("National pension", premiums.pension)
            .tax("Health insurance", premiums.health)
            .tax("Long-term care insurance", premiums.long_term_care)
            .tax("Employment insurance", premiums.employment)
            .contribution("Pension savings", inputs.contributions.pension_savings)
            .contribution("IRP", inputs.contributions.irp)
            .build(CountryBreakdown::Kr(breakdown))
    }

    fn premiums(
        &self,
        gross: Decimal,
    ) -> Premiums {
        let wage = monthly(gross);
        let pension_base = wage.clamp(PENSION_MONTHLY_FLOOR, PENSION_MONTHLY_CEILING);
        let health = floor_to(wage * HEALTH_RATE, PREMIUM_ROUNDING);
        let long_term_care = floor_to(health * LONG_TERM_CARE_RATE, PREMIUM_ROUNDING);
        let employment = floor_to(wage * EMPLOYMENT_RATE, PREMIUM_ROUNDING);
        // The insured-base floor never takes more than the wage left over.
        let left_over = non_negative(wage - health - long_term_care - employment);
        let pension = floor_to(pension_base * PENSION_RATE, PREMIUM_ROUNDING)
            .min(floor_to(left_over, PREMIUM_ROUNDING));

        Premiums {
            pension: annualize(pension),
            health: annualize(health),
            long_term_care: annualize(long_term_care),
            employment: annualize(employment),
        }
    }

    fn earned_income_deduction(
        &self,
        gross: Decimal,
    ) -> Decimal {
        let (from, base, rate) = EARNED_INCOME_DEDUCTION
            .iter()
            .rev()
            .find(|(from, _, _)| gross > *from)
            .copied()
            .unwrap_or(EARNED_INCOME_DEDUCTION[0]);
        floor_whole(base + (gross - from) * rate)
            .min(EARNED_INCOME_DEDUCTION_CAP)
            .min(gross)
    }

    /// 55% up to 1.3M of calculated tax, 30% above, capped by salary band.
    fn earned_income_credit(
        &self,
        calculated_tax: Decimal,
        gross: Decimal,
    ) -> Decimal {
        let credit = if calculated_tax <= EARNED_INCOME_CREDIT_KNEE {
            calculated_tax * dec!(0.55)
        } else {
            dec!(715_000) + (calculated_tax - EARNED_INCOME_CREDIT_KNEE) * dec!(0.30)
        };
        let cap = if gross <= dec!(33_000_000) {
            dec!(740_000)
        } else if gross <= dec!(70_000_000) {
            max(dec!(740_000) - (gross - dec!(33_000_000)) * dec!(0.008), dec!(660_000))
        } else if gross <= dec!(120_000_000) {
            max(dec!(660_000) - (gross - dec!(70_000_000)) * dec!(0.5), dec!(500_000))
        } else {
            max(dec!(500_000) - (gross - dec!(120_000_000)) * dec!(0.5), dec!(200_000))
        };
        floor_whole(credit.min(cap))
    }

    fn child_credit(
        &self,
        children: u8,
    ) -> Decimal {
        match children {
            0 => Decimal::ZERO,
            1 => CHILD_CREDIT_FIRST,
            n => {
                CHILD_CREDIT_FIRST
                    + CHILD_CREDIT_SECOND
                    + CHILD_CREDIT_ADDITIONAL * Decimal::from(n - 2)
            }
        }
    }

    fn pension_account_credit(
        &self,
        gross: Decimal,
        contributions: &KrContributions,
    ) -> Decimal {
        let savings = contributions.pension_savings.min(PENSION_SAVINGS_LIMIT);
        let eligible = (savings + contributions.irp).min(PENSION_ACCOUNT_LIMIT);
        let rate = if gross <= PENSION_CREDIT_SALARY_THRESHOLD {
            PENSION_CREDIT_RATE_LOW
        } else {
            PENSION_CREDIT_RATE_HIGH
        };
        floor_whole(eligible * rate)
    }
}

impl SalaryCalculator for KrCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Kr
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Kr(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Kr, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::validate_brackets;

    fn inputs(gross: Decimal) -> KrInputs {
        KrInputs {
            gross_salary: gross,
            pay_frequency: PayFrequency::Annual,
            ..KrInputs::default()
        }
    }

    fn breakdown(result: &CalculationResult) -> &KrBreakdown {
        match &result.breakdown {
            CountryBreakdown::Kr(breakdown) => breakdown,
            other => panic!("expected a Korean breakdown, got {other:?}"),
        }
    }

    // =========================================================================
    // Social insurance
    // =========================================================================

    #[test]
    fn premiums_are_floored_to_ten_won_monthly() {
        let premiums = KrCalculator.premiums(dec!(60_000_000));

        assert_eq!(premiums.pension, dec!(2_700_000));
        assert_eq!(premiums.health, dec!(2_127_000));
        // 177,250 * 12.95% = 22,953.875 -> 22,950 a month
        assert_eq!(premiums.long_term_care, dec!(275_400));
        assert_eq!(premiums.employment, dec!(540_000));
    }

    #[test]
    fn pension_base_is_clamped_to_floor_and_ceiling() {
        assert_eq!(KrCalculator.premiums(dec!(3_600_000)).pension, dec!(210_600));
        assert_eq!(KrCalculator.premiums(dec!(120_000_000)).pension, dec!(3_439_800));
    }

    // =========================================================================
    // Deductions and credits
    // =========================================================================

    #[test]
    fn earned_income_deduction_schedule() {
        let calc = KrCalculator;

        assert_eq!(calc.earned_income_deduction(dec!(4_000_000)), dec!(2_800_000));
        assert_eq!(calc.earned_income_deduction(dec!(60_000_000)), dec!(12_750_000));
        assert_eq!(calc.earned_income_deduction(dec!(500_000_000)), dec!(20_000_000));
    }

    #[test]
    fn earned_income_credit_respects_salary_band_cap() {
        let calc = KrCalculator;

        assert_eq!(calc.earned_income_credit(dec!(1_000_000), dec!(30_000_000)), dec!(550_000));
        assert_eq!(calc.earned_income_credit(dec!(4_756_140), dec!(60_000_000)), dec!(660_000));
    }

    #[test]
    fn child_credit_grows_with_each_child() {
        let calc = KrCalculator;

        assert_eq!(calc.child_credit(1), dec!(250_000));
        assert_eq!(calc.child_credit(2), dec!(550_000));
        assert_eq!(calc.child_credit(3), dec!(950_000));
    }

    // =========================================================================
    // Full calculation
    // =========================================================================

    #[test]
    fn single_at_60_million() {
        let result = KrCalculator.compute(&inputs(dec!(60_000_000)));
        let detail = breakdown(&result);

        assert_eq!(detail.tax_base, dec!(40_107_600));
        assert_eq!(detail.calculated_tax, dec!(4_756_140));
        assert_eq!(detail.income_tax, dec!(3_966_140));
        assert_eq!(detail.local_income_tax, dec!(396_610));
        assert_eq!(result.total_tax, dec!(10_005_150));
        assert_eq!(result.net_salary, dec!(49_994_850));
    }

    #[test]
    fn children_add_deductions_and_credits() {
        let mut family = inputs(dec!(60_000_000));
        family.children = 2;

        let result = KrCalculator.compute(&family);

        // 40,107,600 - 2 x 1,500,000 = 37,107,600 tax base
        // 840,000 + 23,107,600 x 15% = 4,306,140 calculated
        // less 660,000 earned income, 550,000 child and 130,000 standard credits
        assert_eq!(breakdown(&result).tax_base, dec!(37_107_600));
        assert_eq!(breakdown(&result).calculated_tax, dec!(4_306_140));
        assert_eq!(breakdown(&result).income_tax, dec!(2_966_140));
    }

    #[test]
    fn pension_floor_is_bounded_by_the_wage() {
        let calc = KrCalculator;

        let above_floor = calc.premiums(dec!(12_000_000));
        assert_eq!(above_floor.pension, dec!(540_000));

        // 390,000 floor x 4.5% = 17,550 a month, more than a 10,000 wage holds
        let tiny = calc.premiums(dec!(120_000));
        assert_eq!(
            tiny.pension + tiny.health + tiny.long_term_care + tiny.employment,
            dec!(120_000)
        );

        let result = KrCalculator.compute(&inputs(dec!(120_000)));
        assert_eq!(result.net_salary, Decimal::ZERO);
        assert!(result.effective_tax_rate <= Decimal::ONE);
    }

    #[test]
    fn pension_savings_earn_twelve_percent_above_threshold() {
        let mut saver = inputs(dec!(60_000_000));
        saver.contributions.pension_savings = dec!(6_000_000);

        let result = KrCalculator.compute(&saver);

        assert_eq!(breakdown(&result).pension_account_credit, dec!(720_000));
        assert_eq!(breakdown(&result).income_tax, dec!(3_246_140));
        assert_eq!(result.contribution_amount("Pension savings"), dec!(6_000_000));
    }

    #[test]
    fn credits_never_exceed_calculated_tax() {
        let mut low = inputs(dec!(15_000_000));
        low.children = 3;

        let result = KrCalculator.compute(&low);

        assert_eq!(breakdown(&result).income_tax, dec!(0));
        assert_eq!(breakdown(&result).local_income_tax, dec!(0));
    }

    #[test]
    fn pension_accounts_share_nine_million() {
        let mut saver = inputs(dec!(60_000_000));
        saver.contributions.pension_savings = dec!(8_000_000);
        saver.contributions.irp = dec!(5_000_000);

        let normalized = saver.normalized();

        assert_eq!(normalized.contributions.pension_savings, dec!(6_000_000));
        assert_eq!(normalized.contributions.irp, dec!(3_000_000));
    }

    #[test]
    fn zero_salary_pays_no_premiums() {
        let result = KrCalculator.compute(&inputs(dec!(0)));

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.net_salary, dec!(0));
    }

    #[test]
    fn bracket_schedule_is_well_formed() {
        assert_eq!(validate_brackets(&BRACKETS), Ok(()));
    }
}

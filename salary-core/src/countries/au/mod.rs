//! Australia, PAYG income tax with Medicare and HELP.
//!
//! Taxable income is floored to the dollar; tax, levies and repayments round
//! to the cent. Salary is quoted exclusive of the employer super guarantee.

mod tables;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{floor_whole, non_negative, round_half_up};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, PayFrequency, SharedCeiling, TaxBracket,
};

pub use self::tables::{NON_RESIDENT_BRACKETS, RESIDENT_BRACKETS, WORKING_HOLIDAY_BRACKETS};

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Au,
    name: "Australia",
    currency: "AUD",
    tax_year: "2025-26",
    last_updated: "2025-07-01",
    supports_filing_status: false,
    supports_regions: false,
    default_region: None,
    regions: &[],
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuResidency {
    #[default]
    Resident,
    NonResident,
    WorkingHoliday,
}

impl AuResidency {
    fn brackets(&self) -> &'static [TaxBracket] {
        match self {
            Self::Resident => &RESIDENT_BRACKETS,
            Self::NonResident => &NON_RESIDENT_BRACKETS,
            Self::WorkingHoliday => &WORKING_HOLIDAY_BRACKETS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuContributions {
    /// Concessional salary sacrifice into super.
    pub salary_sacrifice: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    pub residency: AuResidency,
    /// Spouse or dependants, for the family Medicare thresholds.
    pub has_spouse: bool,
    pub dependents: u8,
    pub private_health_cover: bool,
    pub help_debt: bool,
    pub contributions: AuContributions,
}

impl Default for AuInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(100_000),
            pay_frequency: PayFrequency::Biweekly,
            residency: AuResidency::Resident,
            has_spouse: false,
            dependents: 0,
            private_health_cover: false,
            help_debt: false,
            contributions: AuContributions::default(),
        }
    }
}

impl AuInputs {
    fn is_family(&self) -> bool {
        self.has_spouse || self.dependents > 0
    }

    /// Employer super guarantee, counted against the concessional cap.
    pub fn super_guarantee(&self) -> Decimal {
        round_half_up(
            non_negative(self.gross_salary).min(SUPER_MAX_CONTRIBUTION_BASE)
                * SUPER_GUARANTEE_RATE,
        )
    }
}

impl CountryInputs for AuInputs {
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
                "salary_sacrifice",
                ContributionLimit::new(
                    CONCESSIONAL_CAP,
                    "Salary sacrifice",
                    "Concessional super contribution from pre-tax salary",
                    true,
                ),
            )
            .with_shared(
                SharedCeiling::new(
                    "Concessional contributions cap",
                    CONCESSIONAL_CAP,
                    &["salary_sacrifice"],
                )
                .with_reserved(self.super_guarantee()),
            )
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        let limits = self.contribution_limits();
        enforce_limits(
            &limits,
            &mut [Election::new(
                "salary_sacrifice",
                &mut self.contributions.salary_sacrifice,
            )],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuBreakdown {
    pub taxable_income: Decimal,
    pub bracket_tax: Decimal,
    pub low_income_offset: Decimal,
    pub income_tax: Decimal,
    pub medicare_levy: Decimal,
    pub medicare_levy_surcharge: Decimal,
    pub help_repayment: Decimal,
    pub salary_sacrifice: Decimal,
    /// Paid by the employer on top of salary; informational.
    pub super_guarantee: Decimal,
}

/// Calculator for Australian employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuCalculator;

impl AuCalculator {
    pub fn compute(
        &self,
        inputs: &AuInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let sacrifice = inputs.contributions.salary_sacrifice;
        let taxable = floor_whole(non_negative(gross - sacrifice));
        // Reportable super contributions count for MLS and HELP income.
        let reportable_income = taxable + sacrifice;
        let resident = matches!(inputs.residency, AuResidency::Resident);

        let bracket_tax = round_half_up(progressive_tax(taxable, inputs.residency.brackets()));
        let offset = if resident {
            self.low_income_offset(taxable).min(bracket_tax)
        } else {
            Decimal::ZERO
        };
        let income_tax = bracket_tax - offset;

        let (levy, surcharge) = if resident {
            (
                self.medicare_levy(taxable, inputs),
                if inputs.private_health_cover {
                    Decimal::ZERO
                } else {
                    self.medicare_levy_surcharge(reportable_income, taxable, inputs)
                },
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };
        let help = if inputs.help_debt {
            self.help_repayment(reportable_income)
        } else {
            Decimal::ZERO
        };

        let breakdown = AuBreakdown {
            taxable_income: taxable,
            bracket_tax,
            low_income_offset: offset,
            income_tax,
            medicare_levy: levy,
            medicare_levy_surcharge: surcharge,
            help_repayment: help,
            salary_sacrifice: sacrifice,
            super_guarantee: inputs.super_guarantee(),
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(taxable)
            .tax("Income tax", income_tax)
            .tax_if_any("Medicare levy", levy)
            .tax_if_any("Medicare levy surcharge", surcharge)
            .tax_if_any("HELP repayment", help)
            .contribution("Salary sacrifice", sacrifice)
            .build(CountryBreakdown::Au(breakdown))
    }

    fn low_income_offset(
        &self,
        taxable: Decimal,
    ) -> Decimal {
        let offset = if taxable <= LITO_FIRST_THRESHOLD {
            LITO_MAX
        } else if taxable <= LITO_SECOND_THRESHOLD {
            LITO_MAX - (taxable - LITO_FIRST_THRESHOLD) * LITO_FIRST_RATE
        } else {
            LITO_AT_SECOND_THRESHOLD - (taxable - LITO_SECOND_THRESHOLD) * LITO_SECOND_RATE
        };
        round_half_up(non_negative(offset))
    }

    fn medicare_levy(
        &self,
        taxable: Decimal,
        inputs: &AuInputs,
    ) -> Decimal {
        let threshold = if inputs.is_family() {
            MEDICARE_THRESHOLD_FAMILY
                + MEDICARE_THRESHOLD_PER_CHILD * Decimal::from(inputs.dependents)
        } else {
            MEDICARE_THRESHOLD_SINGLE
        };
        if taxable <= threshold {
            return Decimal::ZERO;
        }
        round_half_up(
            (taxable * MEDICARE_LEVY_RATE)
                .min((taxable - threshold) * MEDICARE_SHADE_IN_RATE),
        )
    }

    /// Charged on taxable income at the tier selected by MLS income.
    fn medicare_levy_surcharge(
        &self,
        mls_income: Decimal,
        taxable: Decimal,
        inputs: &AuInputs,
    ) -> Decimal {
        let (tiers, uplift) = if inputs.is_family() {
            let extra_children = inputs.dependents.saturating_sub(1);
            (
                &MLS_TIERS_FAMILY,
                MLS_FAMILY_CHILD_INCREMENT * Decimal::from(extra_children),
            )
        } else {
            (&MLS_TIERS_SINGLE, Decimal::ZERO)
        };
        let rate = tiers
            .iter()
            .rev()
            .find(|(threshold, _)| mls_income > *threshold + uplift)
            .map_or(Decimal::ZERO, |(_, rate)| *rate);
        round_half_up(taxable * rate)
    }

    fn help_repayment(
        &self,
        income: Decimal,
    ) -> Decimal {
        let repayment = if income <= HELP_THRESHOLD {
            Decimal::ZERO
        } else if income <= HELP_SECOND_THRESHOLD {
            (income - HELP_THRESHOLD) * HELP_FIRST_RATE
        } else if income <= HELP_FLAT_THRESHOLD {
            HELP_AT_SECOND_THRESHOLD + (income - HELP_SECOND_THRESHOLD) * HELP_SECOND_RATE
        } else {
            income * HELP_FLAT_RATE
        };
        round_half_up(repayment)
    }
}

impl SalaryCalculator for AuCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Au
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Au(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Au, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::validate_brackets;

    fn resident(gross: Decimal) -> AuInputs {
        AuInputs {
            gross_salary: gross,
            pay_frequency: PayFrequency::Annual,
            private_health_cover: true,
            ..AuInputs::default()
        }
    }

    // =========================================================================
    // Offsets and levies
    // =========================================================================

    #[test]
    fn low_income_offset_tapers_in_two_steps() {
        let calc = AuCalculator;

        assert_eq!(calc.low_income_offset(dec!(30_000)), dec!(700.00));
        assert_eq!(calc.low_income_offset(dec!(40_000)), dec!(575.00));
        assert_eq!(calc.low_income_offset(dec!(70_000)), dec!(0));
    }

    #[test]
    fn medicare_levy_shades_in_above_threshold() {
        let calc = AuCalculator;
        let inputs = resident(dec!(0));

        assert_eq!(calc.medicare_levy(dec!(20_000), &inputs), dec!(0));
        assert_eq!(calc.medicare_levy(dec!(30_000), &inputs), dec!(277.80));
        assert_eq!(calc.medicare_levy(dec!(40_000), &inputs), dec!(800.00));
    }

    #[test]
    fn help_repayment_is_marginal() {
        let calc = AuCalculator;

        assert_eq!(calc.help_repayment(dec!(60_000)), dec!(0));
        assert_eq!(calc.help_repayment(dec!(100_000)), dec!(4_950.00));
        assert_eq!(calc.help_repayment(dec!(150_000)), dec!(12_950.00));
        assert_eq!(calc.help_repayment(dec!(200_000)), dec!(20_000.00));
    }

    // =========================================================================
    // Full calculation
    // =========================================================================

    #[test]
    fn resident_at_100k() {
        let result = AuCalculator.compute(&resident(dec!(100_000)));

        assert_eq!(result.tax_amount("Income tax"), dec!(20_788.00));
        assert_eq!(result.tax_amount("Medicare levy"), dec!(2_000.00));
        assert_eq!(result.net_salary, dec!(77_212.00));
    }

    #[test]
    fn low_earner_gets_offset_and_reduced_levy() {
        let result = AuCalculator.compute(&resident(dec!(30_000)));

        assert_eq!(result.tax_amount("Income tax"), dec!(1_188.00));
        assert_eq!(result.tax_amount("Medicare levy"), dec!(277.80));
    }

    #[test]
    fn surcharge_without_private_cover() {
        let mut uncovered = resident(dec!(120_000));
        uncovered.private_health_cover = false;

        let result = AuCalculator.compute(&uncovered);

        assert_eq!(result.tax_amount("Income tax"), dec!(26_788.00));
        assert_eq!(result.tax_amount("Medicare levy surcharge"), dec!(1_500.00));
    }

    #[test]
    fn non_resident_pays_flat_thirty_percent_without_medicare() {
        let mut visitor = resident(dec!(100_000));
        visitor.residency = AuResidency::NonResident;

        let result = AuCalculator.compute(&visitor);

        assert_eq!(result.total_tax, dec!(30_000.00));
    }

    #[test]
    fn working_holiday_maker_starts_at_fifteen_percent() {
        let mut backpacker = resident(dec!(50_000));
        backpacker.residency = AuResidency::WorkingHoliday;

        let result = AuCalculator.compute(&backpacker);

        assert_eq!(result.total_tax, dec!(8_250.00));
    }

    #[test]
    fn salary_sacrifice_lowers_taxable_but_not_mls_income() {
        let mut saver = resident(dec!(110_000));
        saver.private_health_cover = false;
        saver.contributions.salary_sacrifice = dec!(10_000);

        let result = AuCalculator.compute(&saver);

        assert_eq!(result.taxable_income, dec!(100_000));
        // MLS income is 110,000, so the first tier applies to taxable income
        assert_eq!(result.tax_amount("Medicare levy surcharge"), dec!(1_000.00));
        assert_eq!(result.contribution_amount("Salary sacrifice"), dec!(10_000));
    }

    #[test]
    fn super_guarantee_reserves_concessional_cap() {
        let mut saver = resident(dec!(100_000));
        saver.contributions.salary_sacrifice = dec!(25_000);

        let normalized = saver.normalized();

        assert_eq!(normalized.contributions.salary_sacrifice, dec!(18_000.00));
    }

    #[test]
    fn bracket_schedules_are_well_formed() {
        for schedule in [
            &RESIDENT_BRACKETS[..],
            &NON_RESIDENT_BRACKETS[..],
            &WORKING_HOLIDAY_BRACKETS[..],
        ] {
            assert_eq!(validate_brackets(schedule), Ok(()));
        }
    }
}

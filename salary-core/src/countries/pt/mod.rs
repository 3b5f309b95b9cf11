//! Portugal, IRS category A income. Amounts round to the cent.

mod tables;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{max, non_negative, round_half_up};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, MaritalStatus, PayFrequency,
};

pub use self::tables::BRACKETS;

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Pt,
    name: "Portugal",
    currency: "EUR",
    tax_year: "2025",
    last_updated: "2025-08-01",
    supports_filing_status: true,
    supports_regions: false,
    default_region: None,
    regions: &[],
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PtRegime {
    #[default]
    Standard,
    /// Incentive for scientific research and innovation, 20% flat.
    Ifici,
    NonResident,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PtContributions {
    /// Retirement savings plan (PPR), credited against tax.
    pub ppr: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PtInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    pub regime: PtRegime,
    pub marital_status: MaritalStatus,
    pub joint_filing: bool,
    pub dependents: u8,
    pub age: u8,
    /// Year of working life for IRS Jovem (1 to 10); 0 when not claimed.
    pub irs_jovem_year: u8,
    pub contributions: PtContributions,
}

impl Default for PtInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(40_000),
            pay_frequency: PayFrequency::Monthly,
            regime: PtRegime::Standard,
            marital_status: MaritalStatus::Single,
            joint_filing: false,
            dependents: 0,
            age: 30,
            irs_jovem_year: 0,
            contributions: PtContributions::default(),
        }
    }
}

impl PtInputs {
    /// Maximum PPR credit by age band.
    fn ppr_credit_cap(&self) -> Decimal {
        match self.age {
            0..35 => dec!(400),
            35..=50 => dec!(350),
            _ => dec!(300),
        }
    }
}

impl CountryInputs for PtInputs {
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
            "ppr",
            ContributionLimit::new(
                self.ppr_credit_cap() / PPR_CREDIT_RATE,
                "PPR",
                "Retirement savings plan; 20% credited against tax",
                false,
            ),
        )
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        if self.irs_jovem_year > IRS_JOVEM_MAX_YEAR || self.age > IRS_JOVEM_MAX_AGE {
            self.irs_jovem_year = 0;
        }
        if !self.marital_status.is_married() {
            self.joint_filing = false;
        }
        let limits = self.contribution_limits();
        enforce_limits(
            &limits,
            &mut [Election::new("ppr", &mut self.contributions.ppr)],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PtBreakdown {
    pub regime: PtRegime,
    pub social_security: Decimal,
    pub specific_deduction: Decimal,
    pub irs_jovem_exemption: Decimal,
    pub taxable_income: Decimal,
    pub bracket_tax: Decimal,
    pub personal_deductions: Decimal,
    pub ppr_credit: Decimal,
    pub income_tax: Decimal,
    pub solidarity_surcharge: Decimal,
}

/// Calculator for Portuguese employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct PtCalculator;

impl PtCalculator {
    pub fn compute(
        &self,
        inputs: &PtInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let social_security = round_half_up(gross * SOCIAL_SECURITY_RATE);
        let breakdown = match inputs.regime {
            PtRegime::Standard => self.standard(inputs, gross, social_security),
            PtRegime::Ifici => self.flat(inputs.regime, gross, social_security, IFICI_RATE),
            PtRegime::NonResident => {
                self.flat(inputs.regime, gross, social_security, NON_RESIDENT_RATE)
            }
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(breakdown.taxable_income)
            .tax("IRS", breakdown.income_tax)
            .tax_if_any("Solidarity surcharge", breakdown.solidarity_surcharge)
            .tax("Social security", social_security)
            .contribution("PPR", inputs.contributions.ppr)
            .build(CountryBreakdown::Pt(breakdown))
    }

    fn standard(
        &self,
        inputs: &PtInputs,
        gross: Decimal,
        social_security: Decimal,
    ) -> PtBreakdown {
        let jovem = self.irs_jovem_exemption(inputs, gross);
        let specific = max(SPECIFIC_DEDUCTION_MIN, social_security).min(gross - jovem);
        let taxable = non_negative(gross - jovem - specific);

        let quotient = if inputs.joint_filing {
            dec!(2)
        } else {
            Decimal::ONE
        };
        let per_spouse = taxable / quotient;
        let bracket_tax = round_half_up(progressive_tax(per_spouse, &BRACKETS) * quotient);
        let surcharge = round_half_up(self.solidarity_surcharge(per_spouse) * quotient);

        let personal = PERSONAL_DEDUCTION * quotient
            + DEPENDENT_DEDUCTION * Decimal::from(inputs.dependents);
        let personal = personal.min(bracket_tax);
        let ppr_credit = round_half_up(inputs.contributions.ppr * PPR_CREDIT_RATE)
            .min(inputs.ppr_credit_cap())
            .min(bracket_tax - personal);

        PtBreakdown {
            regime: inputs.regime,
            social_security,
            specific_deduction: specific,
            irs_jovem_exemption: jovem,
            taxable_income: taxable,
            bracket_tax,
            personal_deductions: personal,
            ppr_credit,
            income_tax: bracket_tax - personal - ppr_credit,
            solidarity_surcharge: surcharge,
        }
    }

    fn flat(
        &self,
        regime: PtRegime,
        gross: Decimal,
        social_security: Decimal,
        rate: Decimal,
    ) -> PtBreakdown {
        let tax = round_half_up(gross * rate);
        PtBreakdown {
            regime,
            social_security,
            taxable_income: gross,
            bracket_tax: tax,
            income_tax: tax,
            ..PtBreakdown::default()
        }
    }

    /// 100% in year one, 75% in years two to four, 50% in five to seven and
    /// 25% in eight to ten, capped at 55 × IAS.
    fn irs_jovem_exemption(
        &self,
        inputs: &PtInputs,
        gross: Decimal,
    ) -> Decimal {
        if inputs.age > IRS_JOVEM_MAX_AGE {
            return Decimal::ZERO;
        }
        let share = match inputs.irs_jovem_year {
            1 => Decimal::ONE,
            2..=4 => dec!(0.75),
            5..=7 => dec!(0.50),
            8..=10 => dec!(0.25),
            _ => Decimal::ZERO,
        };
        round_half_up(gross * share).min(IRS_JOVEM_CAP)
    }

    fn solidarity_surcharge(
        &self,
        taxable: Decimal,
    ) -> Decimal {
        SOLIDARITY_TIERS
            .iter()
            .map(|(from, rate, to)| {
                let top = to.map_or(taxable, |to| taxable.min(to));
                non_negative(top - from) * rate
            })
            .sum()
    }
}

impl SalaryCalculator for PtCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Pt
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Pt(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Pt, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::validate_brackets;

    fn inputs(gross: Decimal) -> PtInputs {
        PtInputs {
            gross_salary: gross,
            pay_frequency: PayFrequency::Annual,
            ..PtInputs::default()
        }
    }

    #[test]
    fn standard_single_at_40k() {
        let result = PtCalculator.compute(&inputs(dec!(40_000)));

        assert_eq!(result.taxable_income, dec!(35_537.85));
        assert_eq!(result.tax_amount("IRS"), dec!(8_146.67));
        assert_eq!(result.tax_amount("Social security"), dec!(4_400.00));
        assert_eq!(result.net_salary, dec!(27_453.33));
    }

    #[test]
    fn joint_filing_splits_income_in_two() {
        let mut couple = inputs(dec!(80_000));
        couple.marital_status = MaritalStatus::Married;
        couple.joint_filing = true;

        let result = PtCalculator.compute(&couple);

        assert_eq!(result.tax_amount("IRS"), dec!(16_336.72));
    }

    #[test]
    fn irs_jovem_first_year_is_fully_exempt() {
        let mut young = inputs(dec!(25_000));
        young.age = 25;
        young.irs_jovem_year = 1;

        let result = PtCalculator.compute(&young);

        assert_eq!(result.tax_amount("IRS"), dec!(0));
        assert_eq!(result.total_tax, dec!(2_750.00));
    }

    #[test]
    fn irs_jovem_exemption_is_capped() {
        let mut young = inputs(dec!(40_000));
        young.age = 27;
        young.irs_jovem_year = 2;

        let result = PtCalculator.compute(&young);

        assert_eq!(result.taxable_income, dec!(6_800.35));
        assert_eq!(result.tax_amount("IRS"), dec!(600.04));
    }

    #[test]
    fn solidarity_surcharge_above_80k() {
        // 120,000 less 13,200 social security leaves 106,800 taxable
        let result = PtCalculator.compute(&inputs(dec!(120_000)));

        assert_eq!(result.tax_amount("Solidarity surcharge"), dec!(670.00));
        assert_eq!(PtCalculator.solidarity_surcharge(dec!(300_000)), dec!(6_750.000));
    }

    #[test]
    fn ifici_and_non_resident_are_flat() {
        let mut ifici = inputs(dec!(40_000));
        ifici.regime = PtRegime::Ifici;
        let mut non_resident = inputs(dec!(40_000));
        non_resident.regime = PtRegime::NonResident;

        assert_eq!(PtCalculator.compute(&ifici).total_tax, dec!(12_400.00));
        assert_eq!(PtCalculator.compute(&non_resident).total_tax, dec!(14_400.00));
    }

    #[test]
    fn ppr_credit_reduces_tax() {
        let mut saver = inputs(dec!(40_000));
        saver.contributions.ppr = dec!(2_000);

        let result = PtCalculator.compute(&saver);

        assert_eq!(result.tax_amount("IRS"), dec!(7_746.67));
        assert_eq!(result.contribution_amount("PPR"), dec!(2_000));
    }

    #[test]
    fn normalization_drops_ineligible_reliefs() {
        let mut raw = inputs(dec!(40_000));
        raw.age = 40;
        raw.irs_jovem_year = 3;
        raw.joint_filing = true;
        raw.contributions.ppr = dec!(5_000);

        let normalized = raw.normalized();

        assert_eq!(normalized.irs_jovem_year, 0);
        assert!(!normalized.joint_filing);
        assert_eq!(normalized.contributions.ppr, dec!(1_750));
    }

    #[test]
    fn bracket_schedule_is_well_formed() {
        assert_eq!(validate_brackets(&BRACKETS), Ok(()));
    }
}

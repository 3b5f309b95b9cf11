//! Germany: wage tax under § 32a EStG, solidarity surcharge, church tax and
//! employee social insurance.
//!
//! Taxable income and income tax are floored to the euro, as the tariff
//! formula prescribes. Social insurance and surcharges round to the cent.

mod tables;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{annualize, floor_whole, non_negative, round_half_up};
use crate::calculations::{Election, ResultBuilder, enforce_limits};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, MaritalStatus, PayFrequency,
};

pub use self::tables::REGIONS;

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::De,
    name: "Germany",
    currency: "EUR",
    tax_year: "2025",
    last_updated: "2025-01-01",
    supports_filing_status: true,
    supports_regions: true,
    default_region: Some("BE"),
    regions: &REGIONS,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeContributions {
    /// Occupational pension by salary conversion (Entgeltumwandlung).
    pub bav: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    /// Married couples are assessed jointly with income splitting.
    pub marital_status: MaritalStatus,
    pub children: u8,
    pub age: u8,
    pub single_parent: bool,
    pub church_member: bool,
    /// Federal state, which sets the church tax rate.
    pub state: String,
    /// Health insurer's additional contribution rate, shared with the employer.
    pub health_extra_rate: Decimal,
    pub contributions: DeContributions,
}

impl Default for DeInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(60_000),
            pay_frequency: PayFrequency::Monthly,
            marital_status: MaritalStatus::Single,
            children: 0,
            age: 30,
            single_parent: false,
            church_member: false,
            state: "BE".to_string(),
            health_extra_rate: DEFAULT_HEALTH_EXTRA_RATE,
            contributions: DeContributions::default(),
        }
    }
}

impl CountryInputs for DeInputs {
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
        match CONFIG.region(region) {
            Some(found) => {
                self.state = found.code.to_string();
                true
            }
            None => false,
        }
    }

    fn contribution_limits(&self) -> ContributionLimits {
        ContributionLimits::new().with(
            "bav",
            ContributionLimit::new(
                BAV_TAX_FREE,
                "bAV salary conversion",
                "Tax free to 8% and social-insurance free to 4% of the pension ceiling",
                true,
            ),
        )
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        self.state = self.state.trim().to_ascii_uppercase();
        self.health_extra_rate = non_negative(self.health_extra_rate);
        if self.marital_status.is_married() || self.children == 0 {
            self.single_parent = false;
        }
        let limits = self.contribution_limits();
        enforce_limits(
            &limits,
            &mut [Election::new("bav", &mut self.contributions.bav)],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeBreakdown {
    pub pension_insurance: Decimal,
    pub unemployment_insurance: Decimal,
    pub health_insurance: Decimal,
    pub care_insurance: Decimal,
    pub vorsorgepauschale: Decimal,
    pub taxable_income: Decimal,
    pub income_tax: Decimal,
    /// Income tax after child allowances, the base of both surcharges.
    pub surcharge_base: Decimal,
    pub solidarity_surcharge: Decimal,
    pub church_tax: Decimal,
    pub splitting: bool,
}

#[derive(Debug, Default)]
struct SocialInsurance {
    pension: Decimal,
    unemployment: Decimal,
    health: Decimal,
    care: Decimal,
    /// Health and care contributions deductible under the Vorsorgepauschale.
    health_deductible: Decimal,
}

/// Calculator for German employees on statutory insurance.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeCalculator;

impl DeCalculator {
    pub fn compute(
        &self,
        inputs: &DeInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let bav = inputs.contributions.bav;
        let tax_wage = non_negative(gross - bav.min(BAV_TAX_FREE));
        let social_wage = non_negative(gross - bav.min(BAV_SOCIAL_FREE));
        let joint = inputs.marital_status.is_married();

        let si = self.social_insurance(inputs, social_wage);
        let vorsorge = si.pension + si.health_deductible;

        let special_expenses = if joint {
            SPECIAL_EXPENSES_JOINT
        } else {
            SPECIAL_EXPENSES_SINGLE
        };
        let single_parent = if inputs.single_parent && inputs.children > 0 {
            SINGLE_PARENT_RELIEF + SINGLE_PARENT_EXTRA_CHILD * Decimal::from(inputs.children - 1)
        } else {
            Decimal::ZERO
        };
        let taxable = floor_whole(non_negative(
            tax_wage - EMPLOYEE_ALLOWANCE - special_expenses - vorsorge - single_parent,
        ));
        let income_tax = self.assessed_tax(taxable, joint);

        let surcharge_taxable =
            non_negative(taxable - CHILD_ALLOWANCE * Decimal::from(inputs.children));
        let surcharge_base = self.assessed_tax(surcharge_taxable, joint);
        let solidarity = self.solidarity_surcharge(surcharge_base, joint);
        let church = if inputs.church_member {
            round_half_up(surcharge_base * self.church_tax_rate(&inputs.state))
        } else {
            Decimal::ZERO
        };

        let breakdown = DeBreakdown {
            pension_insurance: si.pension,
            unemployment_insurance: si.unemployment,
            health_insurance: si.health,
            care_insurance: si.care,
            vorsorgepauschale: vorsorge,
            taxable_income: taxable,
            income_tax,
            surcharge_base,
            solidarity_surcharge: solidarity,
            church_tax: church,
            splitting: joint,
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(taxable)
            .tax("Lohnsteuer", income_tax)
            .tax_if_any("Solidaritätszuschlag", solidarity)
            .tax_if_any("Kirchensteuer", church)
            .tax("Rentenversicherung", si.pension)
            .tax("Arbeitslosenversicherung", si.unemployment)
            .tax("Krankenversicherung", si.health)
            .tax("Pflegeversicherung", si.care)
            .contribution("bAV", bav)
            .build(CountryBreakdown::De(breakdown))
    }

    fn social_insurance(
        &self,
        inputs: &DeInputs,
        wage: Decimal,
    ) -> SocialInsurance {
        let pension_base = wage.min(annualize(PENSION_CEILING));
        let health_base = wage.min(annualize(HEALTH_CEILING));
        let extra_share = inputs.health_extra_rate / dec!(2);

        SocialInsurance {
            pension: round_half_up(pension_base * PENSION_RATE),
            unemployment: round_half_up(pension_base * UNEMPLOYMENT_RATE),
            health: round_half_up(health_base * (HEALTH_RATE + extra_share)),
            care: round_half_up(health_base * self.care_rate(inputs.children, inputs.age)),
            health_deductible: round_half_up(health_base * (HEALTH_RATE_DEDUCTIBLE + extra_share))
                + round_half_up(health_base * self.care_rate(inputs.children, inputs.age)),
        }
    }

    fn care_rate(
        &self,
        children: u8,
        age: u8,
    ) -> Decimal {
        match children {
            0 if age >= CARE_CHILDLESS_MIN_AGE => CARE_RATE + CARE_CHILDLESS_SURCHARGE,
            0 | 1 => CARE_RATE,
            n => CARE_RATE - CARE_CHILD_REDUCTION * Decimal::from(n.min(5) - 1),
        }
    }

    /// Income tax under the basic tariff, or the splitting tariff for couples.
    pub fn assessed_tax(
        &self,
        taxable: Decimal,
        joint: bool,
    ) -> Decimal {
        if joint {
            tariff(floor_whole(taxable / dec!(2))) * dec!(2)
        } else {
            tariff(taxable)
        }
    }

    /// 5.5% of income tax above the exemption, phased in at 11.9% of the
    /// excess inside the mitigation zone.
    fn solidarity_surcharge(
        &self,
        base: Decimal,
        joint: bool,
    ) -> Decimal {
        let exemption = if joint {
            SOLIDARITY_EXEMPTION_JOINT
        } else {
            SOLIDARITY_EXEMPTION_SINGLE
        };
        if base <= exemption {
            return Decimal::ZERO;
        }
        let full = base * SOLIDARITY_RATE;
        let mitigated = (base - exemption) * SOLIDARITY_MITIGATION_RATE;
        round_half_up(full.min(mitigated))
    }

    fn church_tax_rate(
        &self,
        state: &str,
    ) -> Decimal {
        if CONFIG.region(state).is_none() {
            warn!(state, "unknown German state, using the 9% church tax rate");
        }
        if CHURCH_TAX_SOUTH_STATES.contains(&state) {
            CHURCH_TAX_RATE_SOUTH
        } else {
            CHURCH_TAX_RATE
        }
    }
}

/// § 32a basic tariff on a taxable income in whole euros.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::countries::de::tariff;
///
/// assert_eq!(tariff(dec!(12_096)), dec!(0));
/// assert_eq!(tariff(dec!(100_000)), dec!(31_088));
/// ```
pub fn tariff(taxable: Decimal) -> Decimal {
    let x = floor_whole(taxable);
    let tax = if x <= BASIC_ALLOWANCE {
        Decimal::ZERO
    } else if x <= ZONE_2_END {
        let (a, b) = ZONE_2_COEFFICIENTS;
        let y = (x - BASIC_ALLOWANCE) / dec!(10_000);
        (a * y + b) * y
    } else if x <= ZONE_3_END {
        let (a, b, c) = ZONE_3_COEFFICIENTS;
        let z = (x - ZONE_2_END) / dec!(10_000);
        (a * z + b) * z + c
    } else if x <= ZONE_4_END {
        let (rate, offset) = ZONE_4_LINEAR;
        rate * x - offset
    } else {
        let (rate, offset) = ZONE_5_LINEAR;
        rate * x - offset
    };
    floor_whole(tax)
}

impl SalaryCalculator for DeCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::De
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::De(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::De, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn inputs(gross: Decimal) -> DeInputs {
        DeInputs {
            gross_salary: gross,
            ..DeInputs::default()
        }
    }

    fn breakdown(result: &CalculationResult) -> &DeBreakdown {
        match &result.breakdown {
            CountryBreakdown::De(breakdown) => breakdown,
            other => panic!("expected a German breakdown, got {other:?}"),
        }
    }

    // =========================================================================
    // Tariff
    // =========================================================================

    #[test]
    fn tariff_zones() {
        assert_eq!(tariff(dec!(12_096)), dec!(0));
        assert_eq!(tariff(dec!(46_764)), dec!(9_561));
        assert_eq!(tariff(dec!(100_000)), dec!(31_088));
        assert_eq!(tariff(dec!(300_000)), dec!(115_753));
    }

    #[test]
    fn splitting_halves_then_doubles() {
        assert_eq!(DeCalculator.assessed_tax(dec!(46_728), true), dec!(4_992));
    }

    #[test]
    fn solidarity_surcharge_mitigation_zone() {
        let calc = DeCalculator;

        assert_eq!(calc.solidarity_surcharge(dec!(19_950), false), dec!(0));
        assert_eq!(calc.solidarity_surcharge(dec!(25_000), false), dec!(600.95));
        assert_eq!(calc.solidarity_surcharge(dec!(44_824), false), dec!(2_465.32));
    }

    // =========================================================================
    // Full calculation
    // =========================================================================

    #[test]
    fn single_childless_at_60k() {
        let result = DeCalculator.compute(&inputs(dec!(60_000)));
        let detail = breakdown(&result);

        assert_eq!(detail.pension_insurance, dec!(5_580.00));
        assert_eq!(detail.health_insurance, dec!(5_130.00));
        assert_eq!(detail.care_insurance, dec!(1_440.00));
        assert_eq!(detail.vorsorgepauschale, dec!(11_970.00));
        assert_eq!(detail.taxable_income, dec!(46_764));
        assert_eq!(detail.income_tax, dec!(9_561));
        assert_eq!(result.net_salary, dec!(37_509.00));
    }

    #[test]
    fn married_couple_uses_splitting() {
        let mut married = inputs(dec!(60_000));
        married.marital_status = MaritalStatus::Married;

        let result = DeCalculator.compute(&married);

        assert!(breakdown(&result).splitting);
        assert_eq!(result.tax_amount("Lohnsteuer"), dec!(4_992));
        assert_eq!(result.net_salary, dec!(42_078.00));
    }

    #[test]
    fn high_earner_pays_solidarity_surcharge() {
        let result = DeCalculator.compute(&inputs(dec!(150_000)));
        let detail = breakdown(&result);

        assert_eq!(detail.pension_insurance, dec!(8_983.80));
        assert_eq!(detail.health_insurance, dec!(5_655.83));
        assert_eq!(detail.income_tax, dec!(44_824));
        assert_eq!(detail.solidarity_surcharge, dec!(2_465.32));
        assert_eq!(result.net_salary, dec!(85_227.65));
    }

    #[test]
    fn church_tax_is_8_percent_in_bavaria() {
        let mut member = inputs(dec!(60_000));
        member.church_member = true;
        member.state = "BY".to_string();

        let result = DeCalculator.compute(&member);

        assert_eq!(result.tax_amount("Kirchensteuer"), dec!(764.88));
    }

    #[test]
    fn single_parent_with_two_children() {
        let mut parent = inputs(dec!(60_000));
        parent.children = 2;
        parent.single_parent = true;

        let result = DeCalculator.compute(&parent);
        let detail = breakdown(&result);

        assert_eq!(detail.care_insurance, dec!(930.00));
        assert_eq!(detail.taxable_income, dec!(42_774));
        assert_eq!(detail.income_tax, dec!(8_220));
        assert_eq!(detail.surcharge_base, dec!(2_551));
    }

    #[test]
    fn bav_reduces_tax_and_social_wages() {
        let mut saver = inputs(dec!(60_000));
        saver.contributions.bav = dec!(3_000);

        let result = DeCalculator.compute(&saver);
        let detail = breakdown(&result);

        assert_eq!(detail.pension_insurance, dec!(5_301.00));
        assert_eq!(detail.taxable_income, dec!(44_362));
        assert_eq!(result.net_salary, dec!(35_969.50));
    }

    #[test]
    fn care_rate_by_children() {
        let calc = DeCalculator;

        assert_eq!(calc.care_rate(0, 22), dec!(0.018));
        assert_eq!(calc.care_rate(0, 30), dec!(0.024));
        assert_eq!(calc.care_rate(1, 30), dec!(0.018));
        assert_eq!(calc.care_rate(7, 30), dec!(0.008));
    }

    #[test]
    fn normalization_drops_single_parent_for_married() {
        let mut raw = inputs(dec!(60_000));
        raw.marital_status = MaritalStatus::Married;
        raw.children = 1;
        raw.single_parent = true;
        raw.contributions.bav = dec!(10_000);
        raw.state = " by ".to_string();

        let normalized = raw.normalized();

        assert!(!normalized.single_parent);
        assert_eq!(normalized.contributions.bav, dec!(7_728));
        assert_eq!(normalized.state, "BY");
    }
}

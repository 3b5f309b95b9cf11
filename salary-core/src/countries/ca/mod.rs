//! Canada: federal and provincial income tax, CPP, CPP2 and EI.
//!
//! Provinces are Ontario (surtax and health premium), British Columbia and
//! Alberta. Every amount rounds to the cent.

mod provinces;
mod tables;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use self::provinces::{ProvinceRules, ontario_health_premium, rules_for};
use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, MaritalStatus, PayFrequency,
};

pub use self::provinces::{PROVINCES, REGIONS};
pub use self::tables::FEDERAL_BRACKETS;

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Ca,
    name: "Canada",
    currency: "CAD",
    tax_year: "2025",
    last_updated: "2025-07-01",
    supports_filing_status: true,
    supports_regions: true,
    default_region: Some("ON"),
    regions: &REGIONS,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaContributions {
    pub rrsp: Decimal,
    pub fhsa: Decimal,
    /// Paid from after-tax income.
    pub tfsa: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    pub province: String,
    /// Married filers claim the spouse amount for a spouse without income.
    pub marital_status: MaritalStatus,
    pub contributions: CaContributions,
}

impl Default for CaInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(100_000),
            pay_frequency: PayFrequency::Biweekly,
            province: "ON".to_string(),
            marital_status: MaritalStatus::Single,
            contributions: CaContributions::default(),
        }
    }
}

impl CountryInputs for CaInputs {
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
        Some(self.province.clone())
    }

    fn set_region(
        &mut self,
        region: &str,
    ) -> bool {
        match rules_for(region) {
            Some(rules) => {
                self.province = rules.code.to_string();
                true
            }
            None => false,
        }
    }

    fn contribution_limits(&self) -> ContributionLimits {
        let rrsp = round_half_up(non_negative(self.gross_salary) * RRSP_RATE).min(RRSP_LIMIT);
        ContributionLimits::new()
            .with(
                "rrsp",
                ContributionLimit::new(
                    rrsp,
                    "RRSP",
                    "Registered retirement savings, 18% of earned income",
                    true,
                ),
            )
            .with(
                "fhsa",
                ContributionLimit::new(FHSA_LIMIT, "FHSA", "First home savings account", true),
            )
            .with(
                "tfsa",
                ContributionLimit::new(TFSA_LIMIT, "TFSA", "Tax-free savings account", false),
            )
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        self.province = self.province.trim().to_ascii_uppercase();
        let limits = self.contribution_limits();
        let c = &mut self.contributions;
        enforce_limits(
            &limits,
            &mut [
                Election::new("rrsp", &mut c.rrsp),
                Election::new("fhsa", &mut c.fhsa),
                Election::new("tfsa", &mut c.tfsa),
            ],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaBreakdown {
    pub cpp: Decimal,
    pub cpp_enhanced_deduction: Decimal,
    pub cpp2: Decimal,
    pub ei: Decimal,
    pub taxable_income: Decimal,
    pub basic_personal_amount: Decimal,
    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,
    pub provincial_surtax: Decimal,
    pub health_premium: Decimal,
}

#[derive(Debug, Default)]
struct Payroll {
    cpp: Decimal,
    cpp_enhanced: Decimal,
    cpp2: Decimal,
    ei: Decimal,
}

impl Payroll {
    /// Base CPP, which earns a credit rather than a deduction.
    fn cpp_base(&self) -> Decimal {
        self.cpp - self.cpp_enhanced
    }
}

#[derive(Debug, Default)]
struct ProvincialTax {
    basic: Decimal,
    surtax: Decimal,
    health_premium: Decimal,
}

/// Calculator for Canadian employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaCalculator;

impl CaCalculator {
    pub fn compute(
        &self,
        inputs: &CaInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let c = &inputs.contributions;
        let married = inputs.marital_status.is_married();
        let payroll = self.payroll(gross);

        let taxable =
            non_negative(gross - c.rrsp - c.fhsa - payroll.cpp_enhanced - payroll.cpp2);
        let bpa = self.basic_personal_amount(taxable);
        let federal = self.federal_tax(gross, taxable, bpa, married, &payroll);

        let provincial = match rules_for(&inputs.province) {
            Some(rules) => self.provincial_tax(rules, taxable, married, &payroll),
            None => {
                warn!(province = %inputs.province, "unknown province, no provincial tax applied");
                ProvincialTax::default()
            }
        };

        let breakdown = CaBreakdown {
            cpp: payroll.cpp,
            cpp_enhanced_deduction: payroll.cpp_enhanced,
            cpp2: payroll.cpp2,
            ei: payroll.ei,
            taxable_income: taxable,
            basic_personal_amount: bpa,
            federal_tax: federal,
            provincial_tax: provincial.basic + provincial.surtax,
            provincial_surtax: provincial.surtax,
            health_premium: provincial.health_premium,
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(taxable)
            .tax("Federal income tax", federal)
            .tax("Provincial income tax", breakdown.provincial_tax)
            .tax_if_any("Ontario Health Premium", provincial.health_premium)
            .tax("CPP", payroll.cpp)
            .tax_if_any("CPP2", payroll.cpp2)
            .tax("EI", payroll.ei)
            .contribution("RRSP", c.rrsp)
            .contribution("FHSA", c.fhsa)
            .contribution("TFSA", c.tfsa)
            .build(CountryBreakdown::Ca(breakdown))
    }

    fn payroll(
        &self,
        gross: Decimal,
    ) -> Payroll {
        let pensionable = non_negative(gross.min(CPP_YMPE) - CPP_BASIC_EXEMPTION);
        Payroll {
            cpp: round_half_up(pensionable * CPP_RATE),
            cpp_enhanced: round_half_up(pensionable * CPP_ENHANCED_RATE),
            cpp2: round_half_up(non_negative(gross.min(CPP2_CEILING) - CPP_YMPE) * CPP2_RATE),
            ei: round_half_up(gross.min(EI_MAX_INSURABLE) * EI_RATE),
        }
    }

    /// Falls linearly from the maximum to the minimum between the two
    /// highest bracket thresholds.
    fn basic_personal_amount(
        &self,
        net_income: Decimal,
    ) -> Decimal {
        if net_income <= BPA_PHASE_START {
            return BPA_MAX;
        }
        if net_income >= BPA_PHASE_END {
            return BPA_MIN;
        }
        let share = (net_income - BPA_PHASE_START) / (BPA_PHASE_END - BPA_PHASE_START);
        round_half_up(BPA_MAX - (BPA_MAX - BPA_MIN) * share)
    }

    fn federal_tax(
        &self,
        gross: Decimal,
        taxable: Decimal,
        bpa: Decimal,
        married: bool,
        payroll: &Payroll,
    ) -> Decimal {
        let spouse = if married { bpa } else { Decimal::ZERO };
        let credits = (bpa
            + spouse
            + payroll.cpp_base()
            + payroll.ei
            + CANADA_EMPLOYMENT_AMOUNT.min(gross))
            * FEDERAL_CREDIT_RATE;
        round_half_up(non_negative(progressive_tax(taxable, &FEDERAL_BRACKETS) - credits))
    }

    fn provincial_tax(
        &self,
        rules: &ProvinceRules,
        taxable: Decimal,
        married: bool,
        payroll: &Payroll,
    ) -> ProvincialTax {
        let spouse = if married {
            rules.spouse_amount
        } else {
            Decimal::ZERO
        };
        let credits = (rules.basic_personal_amount + spouse + payroll.cpp_base() + payroll.ei)
            * rules.credit_rate();
        let basic = non_negative(progressive_tax(taxable, rules.brackets) - credits);
        let surtax: Decimal = rules
            .surtax
            .iter()
            .map(|(threshold, rate)| non_negative(basic - *threshold) * *rate)
            .sum();
        let health_premium = if rules.health_premium {
            round_half_up(ontario_health_premium(taxable))
        } else {
            Decimal::ZERO
        };
        ProvincialTax {
            basic: round_half_up(basic),
            surtax: round_half_up(surtax),
            health_premium,
        }
    }
}

impl SalaryCalculator for CaCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Ca
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Ca(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Ca, other)),
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
        province: &str,
    ) -> CaInputs {
        CaInputs {
            gross_salary: gross,
            province: province.to_string(),
            ..CaInputs::default()
        }
    }

    fn breakdown(result: &CalculationResult) -> &CaBreakdown {
        match &result.breakdown {
            CountryBreakdown::Ca(breakdown) => breakdown,
            other => panic!("expected a Canadian breakdown, got {other:?}"),
        }
    }

    #[test]
    fn provincial_schedules_are_well_formed() {
        for province in &PROVINCES {
            assert_eq!(validate_brackets(province.brackets), Ok(()), "{}", province.code);
        }
    }

    #[test]
    fn payroll_maxes_out_at_100k() {
        let payroll = CaCalculator.payroll(dec!(100_000));

        assert_eq!(payroll.cpp, dec!(4_034.10));
        assert_eq!(payroll.cpp_enhanced, dec!(678.00));
        assert_eq!(payroll.cpp2, dec!(396.00));
        assert_eq!(payroll.ei, dec!(1_077.48));
    }

    #[test]
    fn ontario_at_100k() {
        let result = CaCalculator.compute(&inputs(dec!(100_000), "ON"));
        let detail = breakdown(&result);

        assert_eq!(detail.taxable_income, dec!(98_926.00));
        assert_eq!(detail.federal_tax, dec!(13_642.46));
        assert_eq!(detail.provincial_tax, dec!(6_076.94));
        assert_eq!(detail.health_premium, dec!(750.00));
        assert_eq!(result.net_salary, dec!(74_023.02));
    }

    #[test]
    fn british_columbia_and_alberta_at_100k() {
        let bc = CaCalculator.compute(&inputs(dec!(100_000), "BC"));
        let ab = CaCalculator.compute(&inputs(dec!(100_000), "AB"));

        assert_eq!(breakdown(&bc).provincial_tax, dec!(5_447.89));
        assert_eq!(bc.net_salary, dec!(75_402.07));
        assert_eq!(breakdown(&ab).provincial_tax, dec!(6_552.07));
        assert_eq!(ab.tax_amount("Ontario Health Premium"), dec!(0));
    }

    #[test]
    fn spouse_amount_for_married_filer() {
        let mut married = inputs(dec!(60_000), "ON");
        married.marital_status = MaritalStatus::Married;

        let result = CaCalculator.compute(&married);
        let detail = breakdown(&result);

        assert_eq!(detail.federal_tax, dec!(3_302.76));
        assert_eq!(detail.provincial_tax, dec!(1_888.76));
        assert_eq!(detail.health_premium, dec!(600.00));
    }

    #[test]
    fn basic_personal_amount_phases_out() {
        let calc = CaCalculator;

        assert_eq!(calc.basic_personal_amount(dec!(100_000)), dec!(16_129));
        assert_eq!(calc.basic_personal_amount(dec!(198_926)), dec!(15_685.73));
        assert_eq!(calc.basic_personal_amount(dec!(300_000)), dec!(14_538));
    }

    #[test]
    fn ontario_surtax_applies_to_high_earners() {
        let result = CaCalculator.compute(&inputs(dec!(200_000), "ON"));

        assert!(breakdown(&result).provincial_surtax > dec!(0));
    }

    #[test]
    fn registered_plans_reduce_taxable_income() {
        let mut saver = inputs(dec!(100_000), "ON");
        saver.contributions = CaContributions {
            rrsp: dec!(10_000),
            fhsa: dec!(8_000),
            tfsa: dec!(7_000),
        };

        let result = CaCalculator.compute(&saver);
        let detail = breakdown(&result);

        assert_eq!(detail.taxable_income, dec!(80_926.00));
        assert_eq!(detail.federal_tax, dec!(9_952.46));
        assert_eq!(result.net_salary, dec!(54_421.18));
    }

    #[test]
    fn rrsp_limited_to_18_percent() {
        let mut raw = inputs(dec!(100_000), "on");
        raw.contributions.rrsp = dec!(25_000);
        raw.contributions.tfsa = dec!(10_000);

        let normalized = raw.normalized();

        assert_eq!(normalized.contributions.rrsp, dec!(18_000.00));
        assert_eq!(normalized.contributions.tfsa, dec!(7_000));
        assert_eq!(normalized.province, "ON");
    }

    #[test]
    fn unknown_province_skips_provincial_tax() {
        let result = CaCalculator.compute(&inputs(dec!(100_000), "QC"));

        assert_eq!(breakdown(&result).provincial_tax, dec!(0));
        assert_eq!(result.tax_amount("Federal income tax"), dec!(13_642.46));
    }
}

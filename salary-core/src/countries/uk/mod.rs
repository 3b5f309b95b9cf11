//! United Kingdom PAYE: income tax, Class 1 National Insurance and student
//! loan repayments.
//!
//! Scotland has its own income tax bands; every other region uses the rUK
//! bands. NI and student loans follow the same rules everywhere. Tax and NI
//! round to the penny, student loans to the pound.

mod tables;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use self::tables::*;
use super::{CountryInputs, SalaryCalculator, mismatch};
use crate::calculations::common::{annualize, floor_whole, non_negative, round_half_up};
use crate::calculations::{Election, ResultBuilder, enforce_limits, progressive_tax};
use crate::error::CalculatorError;
use crate::models::{
    CalculationResult, CalculatorInputs, ContributionLimit, ContributionLimits, CountryBreakdown,
    CountryCode, CountryConfig, PayFrequency, SharedCeiling, TaxBracket,
};

pub use self::tables::{BRACKETS, REGIONS, SCOTTISH_BRACKETS};

pub static CONFIG: CountryConfig = CountryConfig {
    code: CountryCode::Uk,
    name: "United Kingdom",
    currency: "GBP",
    tax_year: "2025/26",
    last_updated: "2025-04-06",
    supports_filing_status: false,
    supports_regions: true,
    default_region: Some("ENG"),
    regions: &REGIONS,
};

/// Income-contingent student loan repayment plans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentLoanPlan {
    #[default]
    None,
    Plan1,
    Plan2,
    Plan4,
    Plan5,
}

impl StudentLoanPlan {
    pub fn threshold(&self) -> Option<Decimal> {
        match self {
            Self::None => None,
            Self::Plan1 => Some(dec!(26_065)),
            Self::Plan2 => Some(dec!(28_470)),
            Self::Plan4 => Some(dec!(32_745)),
            Self::Plan5 => Some(dec!(25_000)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UkContributions {
    /// Pension via salary sacrifice; reduces NI-able pay as well.
    pub salary_sacrifice: Decimal,
    /// Pension under a net pay arrangement; reduces taxable pay only.
    pub net_pay_pension: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UkInputs {
    pub gross_salary: Decimal,
    pub pay_frequency: PayFrequency,
    pub region: String,
    pub student_loan: StudentLoanPlan,
    pub postgraduate_loan: bool,
    /// Receives 1,260 of a spouse's personal allowance.
    pub marriage_allowance: bool,
    pub contributions: UkContributions,
}

impl Default for UkInputs {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(50_000),
            pay_frequency: PayFrequency::Monthly,
            region: "ENG".to_string(),
            student_loan: StudentLoanPlan::None,
            postgraduate_loan: false,
            marriage_allowance: false,
            contributions: UkContributions::default(),
        }
    }
}

impl UkInputs {
    pub fn is_scottish(&self) -> bool {
        self.region.eq_ignore_ascii_case("SCT")
    }
}

impl CountryInputs for UkInputs {
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
        Some(self.region.clone())
    }

    fn set_region(
        &mut self,
        region: &str,
    ) -> bool {
        match CONFIG.region(region) {
            Some(found) => {
                self.region = found.code.to_string();
                true
            }
            None => false,
        }
    }

    /// Relief is limited to earnings, so each limit is also capped at gross.
    fn contribution_limits(&self) -> ContributionLimits {
        let limit = PENSION_ANNUAL_ALLOWANCE.min(non_negative(self.gross_salary));
        ContributionLimits::new()
            .with(
                "salary_sacrifice",
                ContributionLimit::new(
                    limit,
                    "Salary sacrifice pension",
                    "Pension paid by giving up salary, free of tax and NI",
                    true,
                ),
            )
            .with(
                "net_pay_pension",
                ContributionLimit::new(
                    limit,
                    "Net pay pension",
                    "Pension deducted before tax but after NI",
                    true,
                ),
            )
            .with_shared(SharedCeiling::new(
                "Pension annual allowance",
                PENSION_ANNUAL_ALLOWANCE,
                &["salary_sacrifice", "net_pay_pension"],
            ))
    }

    fn normalized(mut self) -> Self {
        self.gross_salary = non_negative(self.gross_salary);
        self.region = self.region.trim().to_ascii_uppercase();
        let limits = self.contribution_limits();
        let c = &mut self.contributions;
        enforce_limits(
            &limits,
            &mut [
                Election::new("salary_sacrifice", &mut c.salary_sacrifice),
                Election::new("net_pay_pension", &mut c.net_pay_pension),
            ],
            self.gross_salary,
        );
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UkBreakdown {
    pub adjusted_net_income: Decimal,
    pub personal_allowance: Decimal,
    pub taxable_income: Decimal,
    pub income_tax: Decimal,
    pub marriage_allowance_credit: Decimal,
    pub national_insurance: Decimal,
    pub student_loan: Decimal,
    pub postgraduate_loan: Decimal,
    pub scottish: bool,
}

/// Calculator for UK employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct UkCalculator;

impl UkCalculator {
    pub fn compute(
        &self,
        inputs: &UkInputs,
    ) -> CalculationResult {
        let gross = non_negative(inputs.gross_salary);
        let c = &inputs.contributions;
        let ni_pay = non_negative(gross - c.salary_sacrifice);
        let adjusted = non_negative(ni_pay - c.net_pay_pension);

        if CONFIG.region(&inputs.region).is_none() {
            warn!(region = %inputs.region, "unknown UK region, using rUK bands");
        }
        let scottish = inputs.is_scottish();
        let bands: &[TaxBracket] = if scottish {
            &SCOTTISH_BRACKETS[..]
        } else {
            &BRACKETS[..]
        };

        let allowance = self.personal_allowance(adjusted);
        let taxable = non_negative(adjusted - allowance);
        let bracket_tax = round_half_up(progressive_tax(taxable, bands));
        let credit = if inputs.marriage_allowance && self.basic_rate_only(taxable, scottish) {
            MARRIAGE_ALLOWANCE_CREDIT.min(bracket_tax)
        } else {
            Decimal::ZERO
        };
        let income_tax = bracket_tax - credit;

        let national_insurance = self.national_insurance(ni_pay);
        let student_loan = inputs
            .student_loan
            .threshold()
            .map_or(Decimal::ZERO, |threshold| {
                self.loan_repayment(ni_pay, threshold, STUDENT_LOAN_RATE)
            });
        let postgraduate_loan = if inputs.postgraduate_loan {
            self.loan_repayment(ni_pay, POSTGRADUATE_LOAN_THRESHOLD, POSTGRADUATE_LOAN_RATE)
        } else {
            Decimal::ZERO
        };

        let breakdown = UkBreakdown {
            adjusted_net_income: adjusted,
            personal_allowance: allowance,
            taxable_income: taxable,
            income_tax,
            marriage_allowance_credit: credit,
            national_insurance,
            student_loan,
            postgraduate_loan,
            scottish,
        };

        ResultBuilder::new(&CONFIG, gross, inputs.pay_frequency)
            .taxable_income(taxable)
            .tax("Income tax", income_tax)
            .tax("National Insurance", national_insurance)
            .tax_if_any("Student loan", student_loan)
            .tax_if_any("Postgraduate loan", postgraduate_loan)
            .contribution("Salary sacrifice pension", c.salary_sacrifice)
            .contribution("Net pay pension", c.net_pay_pension)
            .build(CountryBreakdown::Uk(breakdown))
    }

    fn personal_allowance(
        &self,
        adjusted_net_income: Decimal,
    ) -> Decimal {
        let excess = non_negative(adjusted_net_income - TAPER_THRESHOLD);
        non_negative(PERSONAL_ALLOWANCE - floor_whole(excess / dec!(2)))
    }

    /// The recipient of a marriage allowance must not pay above the basic
    /// rate (intermediate rate in Scotland).
    fn basic_rate_only(
        &self,
        taxable: Decimal,
        scottish: bool,
    ) -> bool {
        let band_top = if scottish {
            SCOTTISH_BRACKETS[2].max_income
        } else {
            BRACKETS[0].max_income
        };
        band_top.is_some_and(|top| taxable <= top)
    }

    fn national_insurance(
        &self,
        ni_pay: Decimal,
    ) -> Decimal {
        let primary = annualize(NI_PRIMARY_THRESHOLD);
        let upper = annualize(NI_UPPER_EARNINGS_LIMIT);
        let main = non_negative(ni_pay.min(upper) - primary) * NI_MAIN_RATE;
        let above = non_negative(ni_pay - upper) * NI_UPPER_RATE;
        round_half_up(main + above)
    }

    fn loan_repayment(
        &self,
        earnings: Decimal,
        threshold: Decimal,
        rate: Decimal,
    ) -> Decimal {
        floor_whole(non_negative(earnings - threshold) * rate)
    }
}

impl SalaryCalculator for UkCalculator {
    fn country(&self) -> CountryCode {
        CountryCode::Uk
    }

    fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, CalculatorError> {
        match inputs {
            CalculatorInputs::Uk(inputs) => Ok(self.compute(inputs)),
            other => Err(mismatch(CountryCode::Uk, other)),
        }
    }
}

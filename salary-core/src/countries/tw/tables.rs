use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

pub const BRACKETS: [TaxBracket; 5] = [
    TaxBracket::new(dec!(0), dec!(590_000), dec!(0.05)),
    TaxBracket::new(dec!(590_000), dec!(1_330_000), dec!(0.12)),
    TaxBracket::new(dec!(1_330_000), dec!(2_660_000), dec!(0.20)),
    TaxBracket::new(dec!(2_660_000), dec!(4_980_000), dec!(0.30)),
    TaxBracket::open(dec!(4_980_000), dec!(0.40)),
];

/// Employee share of labour insurance (20% of the 12.5% premium).
pub const LABOR_INSURANCE_RATE: Decimal = dec!(0.025);
pub const LABOR_INSURANCE_MONTHLY_CAP: Decimal = dec!(45_800);

pub const NHI_RATE: Decimal = dec!(0.0517);
pub const NHI_EMPLOYEE_SHARE: Decimal = dec!(0.30);
pub const NHI_MONTHLY_CAP: Decimal = dec!(219_500);
pub const NHI_MAX_DEPENDENTS: u8 = 3;

/// Voluntary labour pension, as a share of wage up to the pension wage cap.
pub const VOLUNTARY_PENSION_RATE: Decimal = dec!(0.06);
pub const PENSION_MONTHLY_WAGE_CAP: Decimal = dec!(150_000);

pub const SALARY_SPECIAL_DEDUCTION: Decimal = dec!(218_000);
pub const EXEMPTION: Decimal = dec!(97_000);
pub const SENIOR_EXEMPTION: Decimal = dec!(145_500);
pub const SENIOR_AGE: u8 = 70;
pub const STANDARD_DEDUCTION_SINGLE: Decimal = dec!(131_000);
pub const STANDARD_DEDUCTION_MARRIED: Decimal = dec!(262_000);
pub const PRESCHOOL_FIRST_CHILD: Decimal = dec!(150_000);
pub const PRESCHOOL_LATER_CHILD: Decimal = dec!(225_000);
pub const BASIC_LIVING_EXPENSE: Decimal = dec!(210_000);

pub const NON_RESIDENT_RATE: Decimal = dec!(0.18);
pub const NON_RESIDENT_LOW_WAGE_RATE: Decimal = dec!(0.06);
/// 1.5 × the monthly minimum wage.
pub const NON_RESIDENT_LOW_WAGE_THRESHOLD: Decimal = dec!(42_885);

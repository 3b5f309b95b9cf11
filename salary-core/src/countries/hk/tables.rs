use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

/// Progressive rates on net chargeable income.
pub const BRACKETS: [TaxBracket; 5] = [
    TaxBracket::new(dec!(0), dec!(50_000), dec!(0.02)),
    TaxBracket::new(dec!(50_000), dec!(100_000), dec!(0.06)),
    TaxBracket::new(dec!(100_000), dec!(150_000), dec!(0.10)),
    TaxBracket::new(dec!(150_000), dec!(200_000), dec!(0.14)),
    TaxBracket::open(dec!(200_000), dec!(0.17)),
];

/// Two-tiered standard rate on net income, from 2024/25.
pub const STANDARD_RATE_BRACKETS: [TaxBracket; 2] = [
    TaxBracket::new(dec!(0), dec!(5_000_000), dec!(0.15)),
    TaxBracket::open(dec!(5_000_000), dec!(0.16)),
];

pub const MPF_RATE: Decimal = dec!(0.05);
pub const MPF_MAX_RELEVANT_INCOME: Decimal = dec!(30_000);
pub const MPF_MIN_RELEVANT_INCOME: Decimal = dec!(7_100);

pub const VOLUNTARY_SAVINGS_CAP: Decimal = dec!(60_000);
pub const HOME_LOAN_INTEREST_CAP: Decimal = dec!(100_000);
pub const DOMESTIC_RENT_CAP: Decimal = dec!(100_000);
pub const VHIS_CAP_PER_POLICY: Decimal = dec!(8_000);

pub const BASIC_ALLOWANCE: Decimal = dec!(132_000);
pub const MARRIED_ALLOWANCE: Decimal = dec!(264_000);
pub const SINGLE_PARENT_ALLOWANCE: Decimal = dec!(132_000);
pub const CHILD_ALLOWANCE: Decimal = dec!(130_000);
/// Extra allowance in the year of birth.
pub const NEWBORN_ALLOWANCE: Decimal = dec!(130_000);
pub const DEPENDENT_PARENT_ALLOWANCE: Decimal = dec!(50_000);
pub const MAX_DEPENDENT_PARENTS: u8 = 4;

/// One-off reduction of salaries tax for 2024/25.
pub const TAX_REDUCTION_CAP: Decimal = dec!(1_500);

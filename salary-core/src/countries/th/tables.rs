use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

pub const BRACKETS: [TaxBracket; 8] = [
    TaxBracket::new(dec!(0), dec!(150_000), dec!(0)),
    TaxBracket::new(dec!(150_000), dec!(300_000), dec!(0.05)),
    TaxBracket::new(dec!(300_000), dec!(500_000), dec!(0.10)),
    TaxBracket::new(dec!(500_000), dec!(750_000), dec!(0.15)),
    TaxBracket::new(dec!(750_000), dec!(1_000_000), dec!(0.20)),
    TaxBracket::new(dec!(1_000_000), dec!(2_000_000), dec!(0.25)),
    TaxBracket::new(dec!(2_000_000), dec!(5_000_000), dec!(0.30)),
    TaxBracket::open(dec!(5_000_000), dec!(0.35)),
];

pub const EXPENSE_RATE: Decimal = dec!(0.50);
pub const EXPENSE_CAP: Decimal = dec!(100_000);

pub const PERSONAL_ALLOWANCE: Decimal = dec!(60_000);
pub const SPOUSE_ALLOWANCE: Decimal = dec!(60_000);
pub const CHILD_ALLOWANCE: Decimal = dec!(30_000);
pub const PARENT_ALLOWANCE: Decimal = dec!(30_000);
/// Own parents and the spouse's parents.
pub const MAX_PARENTS: u8 = 4;

pub const SOCIAL_SECURITY_RATE: Decimal = dec!(0.05);
pub const SOCIAL_SECURITY_MONTHLY_CAP: Decimal = dec!(15_000);

/// `(kind, share of income, absolute cap)` for tax-advantaged savings.
pub const SAVINGS_LIMITS: [(&str, Decimal, Decimal); 5] = [
    ("provident_fund", dec!(0.15), dec!(500_000)),
    ("rmf", dec!(0.30), dec!(500_000)),
    ("ssf", dec!(0.30), dec!(200_000)),
    ("pension_insurance", dec!(0.15), dec!(200_000)),
    ("thai_esg", dec!(0.30), dec!(300_000)),
];
/// Joint cap for retirement savings, outside Thai ESG.
pub const RETIREMENT_SAVINGS_CAP: Decimal = dec!(500_000);

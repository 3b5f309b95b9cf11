use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

pub const BRACKETS: [TaxBracket; 8] = [
    TaxBracket::new(dec!(0), dec!(14_000_000), dec!(0.06)),
    TaxBracket::new(dec!(14_000_000), dec!(50_000_000), dec!(0.15)),
    TaxBracket::new(dec!(50_000_000), dec!(88_000_000), dec!(0.24)),
    TaxBracket::new(dec!(88_000_000), dec!(150_000_000), dec!(0.35)),
    TaxBracket::new(dec!(150_000_000), dec!(300_000_000), dec!(0.38)),
    TaxBracket::new(dec!(300_000_000), dec!(500_000_000), dec!(0.40)),
    TaxBracket::new(dec!(500_000_000), dec!(1_000_000_000), dec!(0.42)),
    TaxBracket::open(dec!(1_000_000_000), dec!(0.45)),
];

pub const PENSION_RATE: Decimal = dec!(0.045);
pub const PENSION_MONTHLY_FLOOR: Decimal = dec!(390_000);
pub const PENSION_MONTHLY_CEILING: Decimal = dec!(6_370_000);
pub const HEALTH_RATE: Decimal = dec!(0.03545);
/// Long-term care premium as a share of the health premium.
pub const LONG_TERM_CARE_RATE: Decimal = dec!(0.1295);
pub const EMPLOYMENT_RATE: Decimal = dec!(0.009);
/// Premiums are cut to the 10 won each month.
pub const PREMIUM_ROUNDING: Decimal = dec!(10);

/// `(from, base deduction, marginal rate)` for the earned income deduction.
pub const EARNED_INCOME_DEDUCTION: [(Decimal, Decimal, Decimal); 5] = [
    (dec!(0), dec!(0), dec!(0.70)),
    (dec!(5_000_000), dec!(3_500_000), dec!(0.40)),
    (dec!(15_000_000), dec!(7_500_000), dec!(0.15)),
    (dec!(45_000_000), dec!(12_000_000), dec!(0.05)),
    (dec!(100_000_000), dec!(14_750_000), dec!(0.02)),
];
pub const EARNED_INCOME_DEDUCTION_CAP: Decimal = dec!(20_000_000);

pub const PERSONAL_DEDUCTION: Decimal = dec!(1_500_000);

pub const EARNED_INCOME_CREDIT_KNEE: Decimal = dec!(1_300_000);
pub const STANDARD_CREDIT: Decimal = dec!(130_000);
pub const CHILD_CREDIT_FIRST: Decimal = dec!(250_000);
pub const CHILD_CREDIT_SECOND: Decimal = dec!(300_000);
pub const CHILD_CREDIT_ADDITIONAL: Decimal = dec!(400_000);

pub const PENSION_SAVINGS_LIMIT: Decimal = dec!(6_000_000);
pub const PENSION_ACCOUNT_LIMIT: Decimal = dec!(9_000_000);
pub const PENSION_CREDIT_SALARY_THRESHOLD: Decimal = dec!(55_000_000);
pub const PENSION_CREDIT_RATE_LOW: Decimal = dec!(0.15);
pub const PENSION_CREDIT_RATE_HIGH: Decimal = dec!(0.12);

pub const LOCAL_INCOME_TAX_RATE: Decimal = dec!(0.10);

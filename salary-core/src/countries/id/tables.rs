use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

/// Article 17 rates (UU HPP), applied to annual PKP.
pub const BRACKETS: [TaxBracket; 5] = [
    TaxBracket::new(dec!(0), dec!(60_000_000), dec!(0.05)),
    TaxBracket::new(dec!(60_000_000), dec!(250_000_000), dec!(0.15)),
    TaxBracket::new(dec!(250_000_000), dec!(500_000_000), dec!(0.25)),
    TaxBracket::new(dec!(500_000_000), dec!(5_000_000_000), dec!(0.30)),
    TaxBracket::open(dec!(5_000_000_000), dec!(0.35)),
];

pub const JOB_EXPENSE_RATE: Decimal = dec!(0.05);
pub const JOB_EXPENSE_CAP: Decimal = dec!(6_000_000);

pub const JHT_RATE: Decimal = dec!(0.02);
pub const JP_RATE: Decimal = dec!(0.01);
pub const JP_MONTHLY_CAP: Decimal = dec!(10_547_400);
pub const KESEHATAN_RATE: Decimal = dec!(0.01);
pub const KESEHATAN_MONTHLY_CAP: Decimal = dec!(12_000_000);

pub const PTKP_PERSONAL: Decimal = dec!(54_000_000);
pub const PTKP_MARRIED: Decimal = dec!(4_500_000);
pub const PTKP_PER_DEPENDENT: Decimal = dec!(4_500_000);
pub const MAX_DEPENDENTS: u8 = 3;

pub const ZAKAT_RATE_CAP: Decimal = dec!(0.025);
pub const PKP_ROUNDING: Decimal = dec!(1000);
/// Multiplier on income tax for taxpayers without a tax ID (NPWP).
pub const NO_NPWP_UPLIFT: Decimal = dec!(1.20);

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Region, TaxBracket};

pub static REGIONS: [Region; 4] = [
    Region::new("ENG", "England"),
    Region::new("NIR", "Northern Ireland"),
    Region::new("SCT", "Scotland"),
    Region::new("WLS", "Wales"),
];

pub const PERSONAL_ALLOWANCE: Decimal = dec!(12_570);
/// Allowance falls by 1 for every 2 of adjusted net income above this.
pub const TAPER_THRESHOLD: Decimal = dec!(100_000);

/// England, Wales and Northern Ireland, on income above the allowance.
pub const BRACKETS: [TaxBracket; 3] = [
    TaxBracket::new(dec!(0), dec!(37_700), dec!(0.20)),
    TaxBracket::new(dec!(37_700), dec!(125_140), dec!(0.40)),
    TaxBracket::open(dec!(125_140), dec!(0.45)),
];

pub const SCOTTISH_BRACKETS: [TaxBracket; 6] = [
    TaxBracket::new(dec!(0), dec!(2_827), dec!(0.19)),
    TaxBracket::new(dec!(2_827), dec!(14_921), dec!(0.20)),
    TaxBracket::new(dec!(14_921), dec!(31_092), dec!(0.21)),
    TaxBracket::new(dec!(31_092), dec!(62_430), dec!(0.42)),
    TaxBracket::new(dec!(62_430), dec!(112_570), dec!(0.45)),
    TaxBracket::open(dec!(112_570), dec!(0.48)),
];

/// 20% of the 1,260 transferable allowance.
pub const MARRIAGE_ALLOWANCE_CREDIT: Decimal = dec!(252);

/// Class 1 employee contributions, monthly thresholds.
pub const NI_PRIMARY_THRESHOLD: Decimal = dec!(1_048);
pub const NI_UPPER_EARNINGS_LIMIT: Decimal = dec!(4_189);
pub const NI_MAIN_RATE: Decimal = dec!(0.08);
pub const NI_UPPER_RATE: Decimal = dec!(0.02);

pub const STUDENT_LOAN_RATE: Decimal = dec!(0.09);
pub const POSTGRADUATE_LOAN_RATE: Decimal = dec!(0.06);
pub const POSTGRADUATE_LOAN_THRESHOLD: Decimal = dec!(21_000);

pub const PENSION_ANNUAL_ALLOWANCE: Decimal = dec!(60_000);

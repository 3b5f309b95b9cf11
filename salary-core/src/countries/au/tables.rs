use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

pub const RESIDENT_BRACKETS: [TaxBracket; 5] = [
    TaxBracket::new(dec!(0), dec!(18_200), dec!(0)),
    TaxBracket::new(dec!(18_200), dec!(45_000), dec!(0.16)),
    TaxBracket::new(dec!(45_000), dec!(135_000), dec!(0.30)),
    TaxBracket::new(dec!(135_000), dec!(190_000), dec!(0.37)),
    TaxBracket::open(dec!(190_000), dec!(0.45)),
];

pub const NON_RESIDENT_BRACKETS: [TaxBracket; 3] = [
    TaxBracket::new(dec!(0), dec!(135_000), dec!(0.30)),
    TaxBracket::new(dec!(135_000), dec!(190_000), dec!(0.37)),
    TaxBracket::open(dec!(190_000), dec!(0.45)),
];

pub const WORKING_HOLIDAY_BRACKETS: [TaxBracket; 4] = [
    TaxBracket::new(dec!(0), dec!(45_000), dec!(0.15)),
    TaxBracket::new(dec!(45_000), dec!(135_000), dec!(0.30)),
    TaxBracket::new(dec!(135_000), dec!(190_000), dec!(0.37)),
    TaxBracket::open(dec!(190_000), dec!(0.45)),
];

pub const LITO_MAX: Decimal = dec!(700);
pub const LITO_FIRST_THRESHOLD: Decimal = dec!(37_500);
pub const LITO_FIRST_RATE: Decimal = dec!(0.05);
pub const LITO_SECOND_THRESHOLD: Decimal = dec!(45_000);
pub const LITO_AT_SECOND_THRESHOLD: Decimal = dec!(325);
pub const LITO_SECOND_RATE: Decimal = dec!(0.015);

pub const MEDICARE_LEVY_RATE: Decimal = dec!(0.02);
/// Levy shades in at 10 cents per dollar above the low-income threshold.
pub const MEDICARE_SHADE_IN_RATE: Decimal = dec!(0.10);
pub const MEDICARE_THRESHOLD_SINGLE: Decimal = dec!(27_222);
pub const MEDICARE_THRESHOLD_FAMILY: Decimal = dec!(45_907);
pub const MEDICARE_THRESHOLD_PER_CHILD: Decimal = dec!(4_216);

/// `(income above, rate)` for the Medicare levy surcharge, singles.
pub const MLS_TIERS_SINGLE: [(Decimal, Decimal); 3] = [
    (dec!(101_000), dec!(0.01)),
    (dec!(118_000), dec!(0.0125)),
    (dec!(158_000), dec!(0.015)),
];
/// Family thresholds; raised by 1,500 for each child after the first.
pub const MLS_TIERS_FAMILY: [(Decimal, Decimal); 3] = [
    (dec!(202_000), dec!(0.01)),
    (dec!(236_000), dec!(0.0125)),
    (dec!(316_000), dec!(0.015)),
];
pub const MLS_FAMILY_CHILD_INCREMENT: Decimal = dec!(1_500);

pub const HELP_THRESHOLD: Decimal = dec!(67_000);
pub const HELP_FIRST_RATE: Decimal = dec!(0.15);
pub const HELP_SECOND_THRESHOLD: Decimal = dec!(125_000);
pub const HELP_AT_SECOND_THRESHOLD: Decimal = dec!(8_700);
pub const HELP_SECOND_RATE: Decimal = dec!(0.17);
/// Above this income the repayment is a flat share of the whole income.
pub const HELP_FLAT_THRESHOLD: Decimal = dec!(179_285);
pub const HELP_FLAT_RATE: Decimal = dec!(0.10);

pub const SUPER_GUARANTEE_RATE: Decimal = dec!(0.12);
pub const SUPER_MAX_CONTRIBUTION_BASE: Decimal = dec!(250_000);
pub const CONCESSIONAL_CAP: Decimal = dec!(30_000);

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

pub const BRACKETS: [TaxBracket; 9] = [
    TaxBracket::new(dec!(0), dec!(8_059), dec!(0.125)),
    TaxBracket::new(dec!(8_059), dec!(12_160), dec!(0.16)),
    TaxBracket::new(dec!(12_160), dec!(17_233), dec!(0.215)),
    TaxBracket::new(dec!(17_233), dec!(22_306), dec!(0.244)),
    TaxBracket::new(dec!(22_306), dec!(28_400), dec!(0.314)),
    TaxBracket::new(dec!(28_400), dec!(41_629), dec!(0.349)),
    TaxBracket::new(dec!(41_629), dec!(44_987), dec!(0.431)),
    TaxBracket::new(dec!(44_987), dec!(83_696), dec!(0.446)),
    TaxBracket::open(dec!(83_696), dec!(0.48)),
];

pub const SOCIAL_SECURITY_RATE: Decimal = dec!(0.11);
pub const SPECIFIC_DEDUCTION_MIN: Decimal = dec!(4_462.15);

/// IRS Jovem exempt amount is capped at 55 × IAS (522.50 in 2025).
pub const IRS_JOVEM_CAP: Decimal = dec!(28_737.50);
pub const IRS_JOVEM_MAX_AGE: u8 = 35;
pub const IRS_JOVEM_MAX_YEAR: u8 = 10;

/// `(from, rate, up to)` of the additional solidarity surcharge.
pub const SOLIDARITY_TIERS: [(Decimal, Decimal, Option<Decimal>); 2] = [
    (dec!(80_000), dec!(0.025), Some(dec!(250_000))),
    (dec!(250_000), dec!(0.05), None),
];

pub const PERSONAL_DEDUCTION: Decimal = dec!(250);
pub const DEPENDENT_DEDUCTION: Decimal = dec!(600);

pub const IFICI_RATE: Decimal = dec!(0.20);
pub const NON_RESIDENT_RATE: Decimal = dec!(0.25);

pub const PPR_CREDIT_RATE: Decimal = dec!(0.20);

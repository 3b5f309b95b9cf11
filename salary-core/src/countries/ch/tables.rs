use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

/// Direct federal tax, basic tariff for single taxpayers.
pub const FEDERAL_SINGLE: [TaxBracket; 10] = [
    TaxBracket::new(dec!(0), dec!(15_200), dec!(0)),
    TaxBracket::new(dec!(15_200), dec!(33_200), dec!(0.0077)),
    TaxBracket::new(dec!(33_200), dec!(43_500), dec!(0.0088)),
    TaxBracket::new(dec!(43_500), dec!(58_000), dec!(0.0264)),
    TaxBracket::new(dec!(58_000), dec!(76_100), dec!(0.0297)),
    TaxBracket::new(dec!(76_100), dec!(82_000), dec!(0.0594)),
    TaxBracket::new(dec!(82_000), dec!(108_800), dec!(0.066)),
    TaxBracket::new(dec!(108_800), dec!(141_500), dec!(0.088)),
    TaxBracket::new(dec!(141_500), dec!(184_900), dec!(0.11)),
    TaxBracket::open(dec!(184_900), dec!(0.132)),
];

/// Direct federal tax, tariff for married couples and single parents.
pub const FEDERAL_MARRIED: [TaxBracket; 14] = [
    TaxBracket::new(dec!(0), dec!(29_700), dec!(0)),
    TaxBracket::new(dec!(29_700), dec!(53_400), dec!(0.01)),
    TaxBracket::new(dec!(53_400), dec!(61_300), dec!(0.02)),
    TaxBracket::new(dec!(61_300), dec!(79_100), dec!(0.03)),
    TaxBracket::new(dec!(79_100), dec!(94_900), dec!(0.04)),
    TaxBracket::new(dec!(94_900), dec!(108_600), dec!(0.05)),
    TaxBracket::new(dec!(108_600), dec!(120_500), dec!(0.06)),
    TaxBracket::new(dec!(120_500), dec!(130_500), dec!(0.07)),
    TaxBracket::new(dec!(130_500), dec!(138_300), dec!(0.08)),
    TaxBracket::new(dec!(138_300), dec!(144_200), dec!(0.09)),
    TaxBracket::new(dec!(144_200), dec!(148_200), dec!(0.10)),
    TaxBracket::new(dec!(148_200), dec!(150_300), dec!(0.11)),
    TaxBracket::new(dec!(150_300), dec!(152_300), dec!(0.12)),
    TaxBracket::open(dec!(152_300), dec!(0.13)),
];

/// From these incomes the whole income is taxed at the flat top rate.
pub const FEDERAL_FLAT_FROM_SINGLE: Decimal = dec!(793_400);
pub const FEDERAL_FLAT_FROM_MARRIED: Decimal = dec!(940_800);
pub const FEDERAL_FLAT_RATE: Decimal = dec!(0.115);
pub const FEDERAL_CHILD_CREDIT: Decimal = dec!(263);

pub const FEDERAL_CHILD_DEDUCTION: Decimal = dec!(6_800);
pub const FEDERAL_MARRIED_DEDUCTION: Decimal = dec!(2_800);

pub const AHV_RATE: Decimal = dec!(0.053);
pub const ALV_RATE: Decimal = dec!(0.011);
pub const ALV_CEILING: Decimal = dec!(148_200);

pub const BVG_ENTRY_THRESHOLD: Decimal = dec!(22_680);
pub const BVG_COORDINATION_DEDUCTION: Decimal = dec!(26_460);
pub const BVG_MAX_INSURED: Decimal = dec!(90_720);
pub const BVG_MIN_COORDINATED: Decimal = dec!(3_780);
/// `(from age, to age, credit)`; the employee pays half.
pub const BVG_AGE_CREDITS: [(u8, u8, Decimal); 4] = [
    (25, 34, dec!(0.07)),
    (35, 44, dec!(0.10)),
    (45, 54, dec!(0.15)),
    (55, 65, dec!(0.18)),
];

pub const PILLAR_3A_LIMIT: Decimal = dec!(7_258);
/// Without a pension fund: 20% of earnings up to the larger cap.
pub const PILLAR_3A_RATE_WITHOUT_BVG: Decimal = dec!(0.20);
pub const PILLAR_3A_LIMIT_WITHOUT_BVG: Decimal = dec!(36_288);

pub const PROFESSIONAL_EXPENSE_RATE: Decimal = dec!(0.03);
pub const PROFESSIONAL_EXPENSE_MIN: Decimal = dec!(2_000);
pub const PROFESSIONAL_EXPENSE_MAX: Decimal = dec!(4_000);
pub const INSURANCE_DEDUCTION_SINGLE: Decimal = dec!(1_800);
pub const INSURANCE_DEDUCTION_MARRIED: Decimal = dec!(3_600);
pub const INSURANCE_DEDUCTION_PER_CHILD: Decimal = dec!(700);

/// Taxable income is assessed in steps of 100 francs.
pub const ASSESSMENT_STEP: Decimal = dec!(100);

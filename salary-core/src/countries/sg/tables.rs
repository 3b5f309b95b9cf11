use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

/// Resident rates from YA2024 onwards.
pub const RESIDENT_BRACKETS: [TaxBracket; 13] = [
    TaxBracket::new(dec!(0), dec!(20_000), dec!(0)),
    TaxBracket::new(dec!(20_000), dec!(30_000), dec!(0.02)),
    TaxBracket::new(dec!(30_000), dec!(40_000), dec!(0.035)),
    TaxBracket::new(dec!(40_000), dec!(80_000), dec!(0.07)),
    TaxBracket::new(dec!(80_000), dec!(120_000), dec!(0.115)),
    TaxBracket::new(dec!(120_000), dec!(160_000), dec!(0.15)),
    TaxBracket::new(dec!(160_000), dec!(200_000), dec!(0.18)),
    TaxBracket::new(dec!(200_000), dec!(240_000), dec!(0.19)),
    TaxBracket::new(dec!(240_000), dec!(280_000), dec!(0.195)),
    TaxBracket::new(dec!(280_000), dec!(320_000), dec!(0.20)),
    TaxBracket::new(dec!(320_000), dec!(500_000), dec!(0.22)),
    TaxBracket::new(dec!(500_000), dec!(1_000_000), dec!(0.23)),
    TaxBracket::open(dec!(1_000_000), dec!(0.24)),
];

pub const NON_RESIDENT_EMPLOYMENT_RATE: Decimal = dec!(0.15);

/// Ordinary wage ceiling per month from January 2025.
pub const CPF_OW_CEILING: Decimal = dec!(7_400);
/// No employee share at or below this monthly wage.
pub const CPF_EMPLOYEE_FLOOR: Decimal = dec!(500);
/// Full employee rate applies above this monthly wage.
pub const CPF_PHASE_IN_END: Decimal = dec!(750);

/// `(upper age inclusive, employee rate)`; the last row covers everyone older.
pub const CPF_EMPLOYEE_RATES: [(u8, Decimal); 5] = [
    (55, dec!(0.20)),
    (60, dec!(0.17)),
    (65, dec!(0.115)),
    (70, dec!(0.075)),
    (u8::MAX, dec!(0.05)),
];

/// `(upper age exclusive, relief)`.
pub const EARNED_INCOME_RELIEF: [(u8, Decimal); 3] = [
    (55, dec!(1_000)),
    (60, dec!(6_000)),
    (u8::MAX, dec!(8_000)),
];

pub const SPOUSE_RELIEF: Decimal = dec!(2_000);
pub const QUALIFYING_CHILD_RELIEF: Decimal = dec!(4_000);
pub const PARENT_RELIEF: Decimal = dec!(9_000);
pub const MAX_PARENTS: u8 = 2;

pub const SRS_CAP_LOCAL: Decimal = dec!(15_300);
pub const SRS_CAP_FOREIGNER: Decimal = dec!(35_700);
pub const CPF_TOP_UP_SELF_CAP: Decimal = dec!(8_000);
pub const CPF_TOP_UP_FAMILY_CAP: Decimal = dec!(8_000);

/// Overall cap on personal reliefs per year of assessment.
pub const RELIEF_CAP: Decimal = dec!(80_000);

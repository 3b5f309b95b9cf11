use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

pub const SINGLE_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::new(dec!(0), dec!(11_925), dec!(0.10)),
    TaxBracket::new(dec!(11_925), dec!(48_475), dec!(0.12)),
    TaxBracket::new(dec!(48_475), dec!(103_350), dec!(0.22)),
    TaxBracket::new(dec!(103_350), dec!(197_300), dec!(0.24)),
    TaxBracket::new(dec!(197_300), dec!(250_525), dec!(0.32)),
    TaxBracket::new(dec!(250_525), dec!(626_350), dec!(0.35)),
    TaxBracket::open(dec!(626_350), dec!(0.37)),
];

pub const MARRIED_JOINT_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::new(dec!(0), dec!(23_850), dec!(0.10)),
    TaxBracket::new(dec!(23_850), dec!(96_950), dec!(0.12)),
    TaxBracket::new(dec!(96_950), dec!(206_700), dec!(0.22)),
    TaxBracket::new(dec!(206_700), dec!(394_600), dec!(0.24)),
    TaxBracket::new(dec!(394_600), dec!(501_050), dec!(0.32)),
    TaxBracket::new(dec!(501_050), dec!(751_600), dec!(0.35)),
    TaxBracket::open(dec!(751_600), dec!(0.37)),
];

pub const MARRIED_SEPARATE_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::new(dec!(0), dec!(11_925), dec!(0.10)),
    TaxBracket::new(dec!(11_925), dec!(48_475), dec!(0.12)),
    TaxBracket::new(dec!(48_475), dec!(103_350), dec!(0.22)),
    TaxBracket::new(dec!(103_350), dec!(197_300), dec!(0.24)),
    TaxBracket::new(dec!(197_300), dec!(250_525), dec!(0.32)),
    TaxBracket::new(dec!(250_525), dec!(375_800), dec!(0.35)),
    TaxBracket::open(dec!(375_800), dec!(0.37)),
];

pub const HEAD_OF_HOUSEHOLD_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::new(dec!(0), dec!(17_000), dec!(0.10)),
    TaxBracket::new(dec!(17_000), dec!(64_850), dec!(0.12)),
    TaxBracket::new(dec!(64_850), dec!(103_350), dec!(0.22)),
    TaxBracket::new(dec!(103_350), dec!(197_300), dec!(0.24)),
    TaxBracket::new(dec!(197_300), dec!(250_500), dec!(0.32)),
    TaxBracket::new(dec!(250_500), dec!(626_350), dec!(0.35)),
    TaxBracket::open(dec!(626_350), dec!(0.37)),
];

pub const STANDARD_DEDUCTION_SINGLE: Decimal = dec!(15_750);
pub const STANDARD_DEDUCTION_JOINT: Decimal = dec!(31_500);
pub const STANDARD_DEDUCTION_HEAD_OF_HOUSEHOLD: Decimal = dec!(23_625);

pub const SOCIAL_SECURITY_RATE: Decimal = dec!(0.062);
pub const SOCIAL_SECURITY_WAGE_BASE: Decimal = dec!(176_100);
pub const MEDICARE_RATE: Decimal = dec!(0.0145);
pub const ADDITIONAL_MEDICARE_RATE: Decimal = dec!(0.009);
pub const ADDITIONAL_MEDICARE_SINGLE: Decimal = dec!(200_000);
pub const ADDITIONAL_MEDICARE_JOINT: Decimal = dec!(250_000);
pub const ADDITIONAL_MEDICARE_SEPARATE: Decimal = dec!(125_000);

pub const CHILD_TAX_CREDIT: Decimal = dec!(2_200);
pub const CHILD_CREDIT_PHASE_OUT_SINGLE: Decimal = dec!(200_000);
pub const CHILD_CREDIT_PHASE_OUT_JOINT: Decimal = dec!(400_000);
/// Reduction per 1,000 (or part of it) of income above the phase-out start.
pub const CHILD_CREDIT_PHASE_OUT_STEP: Decimal = dec!(50);

pub const ELECTIVE_DEFERRAL_LIMIT: Decimal = dec!(23_500);
pub const DEFERRAL_CATCH_UP: Decimal = dec!(7_500);
/// SECURE 2.0 enhanced catch-up for ages 60 to 63.
pub const DEFERRAL_SUPER_CATCH_UP: Decimal = dec!(11_250);
pub const IRA_LIMIT: Decimal = dec!(7_000);
pub const IRA_CATCH_UP: Decimal = dec!(1_000);
pub const HSA_SELF_LIMIT: Decimal = dec!(4_300);
pub const HSA_FAMILY_LIMIT: Decimal = dec!(8_550);
pub const HSA_CATCH_UP: Decimal = dec!(1_000);
pub const FSA_LIMIT: Decimal = dec!(3_300);

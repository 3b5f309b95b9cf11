use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

/// The lowest rate is 14.5% for 2025 (15% to June, 14% from July).
pub const FEDERAL_BRACKETS: [TaxBracket; 5] = [
    TaxBracket::new(dec!(0), dec!(57_375), dec!(0.145)),
    TaxBracket::new(dec!(57_375), dec!(114_750), dec!(0.205)),
    TaxBracket::new(dec!(114_750), dec!(177_882), dec!(0.26)),
    TaxBracket::new(dec!(177_882), dec!(253_414), dec!(0.29)),
    TaxBracket::open(dec!(253_414), dec!(0.33)),
];
pub const FEDERAL_CREDIT_RATE: Decimal = dec!(0.145);

/// Basic personal amount, reduced between the last two bracket thresholds.
pub const BPA_MAX: Decimal = dec!(16_129);
pub const BPA_MIN: Decimal = dec!(14_538);
pub const BPA_PHASE_START: Decimal = dec!(177_882);
pub const BPA_PHASE_END: Decimal = dec!(253_414);
pub const CANADA_EMPLOYMENT_AMOUNT: Decimal = dec!(1_471);

pub const CPP_BASIC_EXEMPTION: Decimal = dec!(3_500);
pub const CPP_YMPE: Decimal = dec!(71_300);
pub const CPP_RATE: Decimal = dec!(0.0595);
/// Enhanced share of the CPP rate, deducted from income instead of credited.
pub const CPP_ENHANCED_RATE: Decimal = dec!(0.01);
pub const CPP2_CEILING: Decimal = dec!(81_200);
pub const CPP2_RATE: Decimal = dec!(0.04);

pub const EI_RATE: Decimal = dec!(0.0164);
pub const EI_MAX_INSURABLE: Decimal = dec!(65_700);

pub const RRSP_RATE: Decimal = dec!(0.18);
pub const RRSP_LIMIT: Decimal = dec!(32_490);
pub const FHSA_LIMIT: Decimal = dec!(8_000);
pub const TFSA_LIMIT: Decimal = dec!(7_000);

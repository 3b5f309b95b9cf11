use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::Region;

pub static REGIONS: [Region; 16] = [
    Region::new("BB", "Brandenburg"),
    Region::new("BE", "Berlin"),
    Region::new("BW", "Baden-Württemberg"),
    Region::new("BY", "Bayern"),
    Region::new("HB", "Bremen"),
    Region::new("HE", "Hessen"),
    Region::new("HH", "Hamburg"),
    Region::new("MV", "Mecklenburg-Vorpommern"),
    Region::new("NI", "Niedersachsen"),
    Region::new("NW", "Nordrhein-Westfalen"),
    Region::new("RP", "Rheinland-Pfalz"),
    Region::new("SH", "Schleswig-Holstein"),
    Region::new("SL", "Saarland"),
    Region::new("SN", "Sachsen"),
    Region::new("ST", "Sachsen-Anhalt"),
    Region::new("TH", "Thüringen"),
];

// § 32a EStG zone boundaries and coefficients.
pub const BASIC_ALLOWANCE: Decimal = dec!(12_096);
pub const ZONE_2_END: Decimal = dec!(17_443);
pub const ZONE_3_END: Decimal = dec!(68_480);
pub const ZONE_4_END: Decimal = dec!(277_825);
pub const ZONE_2_COEFFICIENTS: (Decimal, Decimal) = (dec!(932.30), dec!(1_400));
pub const ZONE_3_COEFFICIENTS: (Decimal, Decimal, Decimal) =
    (dec!(176.64), dec!(2_397), dec!(1_015.13));
pub const ZONE_4_LINEAR: (Decimal, Decimal) = (dec!(0.42), dec!(10_911.92));
pub const ZONE_5_LINEAR: (Decimal, Decimal) = (dec!(0.45), dec!(19_246.67));

/// Monthly contribution ceilings.
pub const PENSION_CEILING: Decimal = dec!(8_050);
pub const HEALTH_CEILING: Decimal = dec!(5_512.50);

pub const PENSION_RATE: Decimal = dec!(0.093);
pub const UNEMPLOYMENT_RATE: Decimal = dec!(0.013);
pub const HEALTH_RATE: Decimal = dec!(0.073);
/// Health rate without the sick-pay share, used for the Vorsorgepauschale.
pub const HEALTH_RATE_DEDUCTIBLE: Decimal = dec!(0.070);
pub const DEFAULT_HEALTH_EXTRA_RATE: Decimal = dec!(0.025);
pub const CARE_RATE: Decimal = dec!(0.018);
pub const CARE_CHILDLESS_SURCHARGE: Decimal = dec!(0.006);
pub const CARE_CHILDLESS_MIN_AGE: u8 = 23;
/// Reduction per child from the second to the fifth.
pub const CARE_CHILD_REDUCTION: Decimal = dec!(0.0025);

pub const EMPLOYEE_ALLOWANCE: Decimal = dec!(1_230);
pub const SPECIAL_EXPENSES_SINGLE: Decimal = dec!(36);
pub const SPECIAL_EXPENSES_JOINT: Decimal = dec!(72);
pub const SINGLE_PARENT_RELIEF: Decimal = dec!(4_260);
pub const SINGLE_PARENT_EXTRA_CHILD: Decimal = dec!(240);
/// Full child allowance per child, used for the surcharge bases.
pub const CHILD_ALLOWANCE: Decimal = dec!(9_600);

pub const SOLIDARITY_RATE: Decimal = dec!(0.055);
pub const SOLIDARITY_MITIGATION_RATE: Decimal = dec!(0.119);
pub const SOLIDARITY_EXEMPTION_SINGLE: Decimal = dec!(19_950);
pub const SOLIDARITY_EXEMPTION_JOINT: Decimal = dec!(39_900);

pub const CHURCH_TAX_RATE: Decimal = dec!(0.09);
pub const CHURCH_TAX_RATE_SOUTH: Decimal = dec!(0.08);
pub const CHURCH_TAX_SOUTH_STATES: [&str; 2] = ["BW", "BY"];

/// bAV salary conversion: 8% of the annual pension ceiling is tax free,
/// 4% is also free of social insurance.
pub const BAV_TAX_FREE: Decimal = dec!(7_728);
pub const BAV_SOCIAL_FREE: Decimal = dec!(3_864);

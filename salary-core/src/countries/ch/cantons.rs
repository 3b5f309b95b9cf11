//! Cantonal and communal income tax for the capital commune of each canton.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Region, TaxBracket};

/// How a canton taxes married couples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarriedTariff {
    /// A dedicated tariff for couples.
    Separate(&'static [TaxBracket]),
    /// The single tariff applied to income divided by `divisor`, scaled back.
    Splitting(Decimal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CantonRules {
    pub code: &'static str,
    pub name: &'static str,
    /// Basic (simple) tax tariff.
    pub single: &'static [TaxBracket],
    pub married: MarriedTariff,
    /// Share taken off the basic tax before multipliers.
    pub basic_reduction: Decimal,
    /// Cantonal plus communal multiplier on the basic tax.
    pub multiplier: Decimal,
    pub child_deduction: Decimal,
    /// Flat head tax per adult.
    pub head_tax: Decimal,
}

const ZH_SINGLE: [TaxBracket; 13] = [
    TaxBracket::new(dec!(0), dec!(7_000), dec!(0)),
    TaxBracket::new(dec!(7_000), dec!(11_400), dec!(0.02)),
    TaxBracket::new(dec!(11_400), dec!(16_100), dec!(0.03)),
    TaxBracket::new(dec!(16_100), dec!(23_700), dec!(0.04)),
    TaxBracket::new(dec!(23_700), dec!(33_000), dec!(0.05)),
    TaxBracket::new(dec!(33_000), dec!(43_700), dec!(0.06)),
    TaxBracket::new(dec!(43_700), dec!(56_100), dec!(0.07)),
    TaxBracket::new(dec!(56_100), dec!(73_000), dec!(0.08)),
    TaxBracket::new(dec!(73_000), dec!(105_500), dec!(0.09)),
    TaxBracket::new(dec!(105_500), dec!(137_300), dec!(0.10)),
    TaxBracket::new(dec!(137_300), dec!(188_700), dec!(0.11)),
    TaxBracket::new(dec!(188_700), dec!(254_900), dec!(0.12)),
    TaxBracket::open(dec!(254_900), dec!(0.13)),
];

const ZH_MARRIED: [TaxBracket; 13] = [
    TaxBracket::new(dec!(0), dec!(13_900), dec!(0)),
    TaxBracket::new(dec!(13_900), dec!(20_300), dec!(0.02)),
    TaxBracket::new(dec!(20_300), dec!(28_000), dec!(0.03)),
    TaxBracket::new(dec!(28_000), dec!(37_900), dec!(0.04)),
    TaxBracket::new(dec!(37_900), dec!(49_300), dec!(0.05)),
    TaxBracket::new(dec!(49_300), dec!(63_300), dec!(0.06)),
    TaxBracket::new(dec!(63_300), dec!(79_300), dec!(0.07)),
    TaxBracket::new(dec!(79_300), dec!(97_100), dec!(0.08)),
    TaxBracket::new(dec!(97_100), dec!(135_000), dec!(0.09)),
    TaxBracket::new(dec!(135_000), dec!(176_800), dec!(0.10)),
    TaxBracket::new(dec!(176_800), dec!(229_400), dec!(0.11)),
    TaxBracket::new(dec!(229_400), dec!(287_000), dec!(0.12)),
    TaxBracket::open(dec!(287_000), dec!(0.13)),
];

const ZG_SINGLE: [TaxBracket; 18] = [
    TaxBracket::new(dec!(0), dec!(1_100), dec!(0.005)),
    TaxBracket::new(dec!(1_100), dec!(3_200), dec!(0.01)),
    TaxBracket::new(dec!(3_200), dec!(6_300), dec!(0.02)),
    TaxBracket::new(dec!(6_300), dec!(10_500), dec!(0.03)),
    TaxBracket::new(dec!(10_500), dec!(16_000), dec!(0.035)),
    TaxBracket::new(dec!(16_000), dec!(22_400), dec!(0.04)),
    TaxBracket::new(dec!(22_400), dec!(30_200), dec!(0.045)),
    TaxBracket::new(dec!(30_200), dec!(39_300), dec!(0.05)),
    TaxBracket::new(dec!(39_300), dec!(49_800), dec!(0.055)),
    TaxBracket::new(dec!(49_800), dec!(61_800), dec!(0.06)),
    TaxBracket::new(dec!(61_800), dec!(75_400), dec!(0.065)),
    TaxBracket::new(dec!(75_400), dec!(90_700), dec!(0.07)),
    TaxBracket::new(dec!(90_700), dec!(107_600), dec!(0.075)),
    TaxBracket::new(dec!(107_600), dec!(126_200), dec!(0.08)),
    TaxBracket::new(dec!(126_200), dec!(146_400), dec!(0.085)),
    TaxBracket::new(dec!(146_400), dec!(168_500), dec!(0.09)),
    TaxBracket::new(dec!(168_500), dec!(192_500), dec!(0.095)),
    TaxBracket::open(dec!(192_500), dec!(0.10)),
];

const GE_SINGLE: [TaxBracket; 18] = [
    TaxBracket::new(dec!(0), dec!(18_479), dec!(0)),
    TaxBracket::new(dec!(18_479), dec!(22_264), dec!(0.08)),
    TaxBracket::new(dec!(22_264), dec!(24_616), dec!(0.09)),
    TaxBracket::new(dec!(24_616), dec!(26_969), dec!(0.10)),
    TaxBracket::new(dec!(26_969), dec!(29_320), dec!(0.11)),
    TaxBracket::new(dec!(29_320), dec!(34_888), dec!(0.12)),
    TaxBracket::new(dec!(34_888), dec!(38_516), dec!(0.13)),
    TaxBracket::new(dec!(38_516), dec!(42_926), dec!(0.14)),
    TaxBracket::new(dec!(42_926), dec!(47_236), dec!(0.145)),
    TaxBracket::new(dec!(47_236), dec!(76_492), dec!(0.15)),
    TaxBracket::new(dec!(76_492), dec!(125_573), dec!(0.155)),
    TaxBracket::new(dec!(125_573), dec!(166_331), dec!(0.16)),
    TaxBracket::new(dec!(166_331), dec!(201_276), dec!(0.165)),
    TaxBracket::new(dec!(201_276), dec!(260_325), dec!(0.17)),
    TaxBracket::new(dec!(260_325), dec!(342_518), dec!(0.175)),
    TaxBracket::new(dec!(342_518), dec!(425_306), dec!(0.18)),
    TaxBracket::new(dec!(425_306), dec!(649_441), dec!(0.185)),
    TaxBracket::open(dec!(649_441), dec!(0.19)),
];

pub static CANTONS: [CantonRules; 3] = [
    CantonRules {
        code: "GE",
        name: "Genève",
        single: &GE_SINGLE,
        married: MarriedTariff::Splitting(dec!(2)),
        basic_reduction: dec!(0.12),
        multiplier: dec!(1.93),
        child_deduction: dec!(13_536),
        head_tax: dec!(25),
    },
    CantonRules {
        code: "ZG",
        name: "Zug",
        single: &ZG_SINGLE,
        married: MarriedTariff::Splitting(dec!(2)),
        basic_reduction: dec!(0),
        multiplier: dec!(1.32),
        child_deduction: dec!(12_000),
        head_tax: dec!(0),
    },
    CantonRules {
        code: "ZH",
        name: "Zürich",
        single: &ZH_SINGLE,
        married: MarriedTariff::Separate(&ZH_MARRIED),
        basic_reduction: dec!(0),
        multiplier: dec!(2.17),
        child_deduction: dec!(9_300),
        head_tax: dec!(24),
    },
];

pub static REGIONS: [Region; 3] = [
    Region::new("GE", "Genève"),
    Region::new("ZG", "Zug"),
    Region::new("ZH", "Zürich"),
];

pub fn rules_for(code: &str) -> Option<&'static CantonRules> {
    CANTONS
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Region, TaxBracket};

/// Personal income tax rules of one province.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvinceRules {
    pub code: &'static str,
    pub name: &'static str,
    pub brackets: &'static [TaxBracket],
    pub basic_personal_amount: Decimal,
    pub spouse_amount: Decimal,
    /// `(threshold, rate)` pairs applied to basic provincial tax.
    pub surtax: &'static [(Decimal, Decimal)],
    pub health_premium: bool,
}

impl ProvinceRules {
    /// Non-refundable credits are valued at the lowest bracket rate.
    pub fn credit_rate(&self) -> Decimal {
        self.brackets.first().map_or(Decimal::ZERO, |b| b.tax_rate)
    }
}

const ON_BRACKETS: [TaxBracket; 5] = [
    TaxBracket::new(dec!(0), dec!(52_886), dec!(0.0505)),
    TaxBracket::new(dec!(52_886), dec!(105_775), dec!(0.0915)),
    TaxBracket::new(dec!(105_775), dec!(150_000), dec!(0.1116)),
    TaxBracket::new(dec!(150_000), dec!(220_000), dec!(0.1216)),
    TaxBracket::open(dec!(220_000), dec!(0.1316)),
];

const BC_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::new(dec!(0), dec!(49_279), dec!(0.0506)),
    TaxBracket::new(dec!(49_279), dec!(98_560), dec!(0.077)),
    TaxBracket::new(dec!(98_560), dec!(113_158), dec!(0.105)),
    TaxBracket::new(dec!(113_158), dec!(137_407), dec!(0.1229)),
    TaxBracket::new(dec!(137_407), dec!(186_306), dec!(0.147)),
    TaxBracket::new(dec!(186_306), dec!(259_829), dec!(0.168)),
    TaxBracket::open(dec!(259_829), dec!(0.205)),
];

const AB_BRACKETS: [TaxBracket; 6] = [
    TaxBracket::new(dec!(0), dec!(60_000), dec!(0.08)),
    TaxBracket::new(dec!(60_000), dec!(151_234), dec!(0.10)),
    TaxBracket::new(dec!(151_234), dec!(181_481), dec!(0.12)),
    TaxBracket::new(dec!(181_481), dec!(241_974), dec!(0.13)),
    TaxBracket::new(dec!(241_974), dec!(362_961), dec!(0.14)),
    TaxBracket::open(dec!(362_961), dec!(0.15)),
];

const ON_SURTAX: [(Decimal, Decimal); 2] = [(dec!(5_710), dec!(0.20)), (dec!(7_307), dec!(0.36))];

pub static PROVINCES: [ProvinceRules; 3] = [
    ProvinceRules {
        code: "AB",
        name: "Alberta",
        brackets: &AB_BRACKETS,
        basic_personal_amount: dec!(22_323),
        spouse_amount: dec!(22_323),
        surtax: &[],
        health_premium: false,
    },
    ProvinceRules {
        code: "BC",
        name: "British Columbia",
        brackets: &BC_BRACKETS,
        basic_personal_amount: dec!(12_932),
        spouse_amount: dec!(11_073),
        surtax: &[],
        health_premium: false,
    },
    ProvinceRules {
        code: "ON",
        name: "Ontario",
        brackets: &ON_BRACKETS,
        basic_personal_amount: dec!(12_747),
        spouse_amount: dec!(10_823),
        surtax: &ON_SURTAX,
        health_premium: true,
    },
];

pub static REGIONS: [Region; 3] = [
    Region::new("AB", "Alberta"),
    Region::new("BC", "British Columbia"),
    Region::new("ON", "Ontario"),
];

pub fn rules_for(code: &str) -> Option<&'static ProvinceRules> {
    PROVINCES
        .iter()
        .find(|p| p.code.eq_ignore_ascii_case(code.trim()))
}

/// Ontario Health Premium: `(income from, income to, base, rate, cap)`.
const HEALTH_PREMIUM_TIERS: [(Decimal, Decimal, Decimal, Decimal, Decimal); 5] = [
    (dec!(20_000), dec!(36_000), dec!(0), dec!(0.06), dec!(300)),
    (dec!(36_000), dec!(48_000), dec!(300), dec!(0.06), dec!(450)),
    (dec!(48_000), dec!(72_000), dec!(450), dec!(0.25), dec!(600)),
    (dec!(72_000), dec!(200_000), dec!(600), dec!(0.25), dec!(750)),
    (dec!(200_000), Decimal::MAX, dec!(750), dec!(0.25), dec!(900)),
];

pub fn ontario_health_premium(taxable_income: Decimal) -> Decimal {
    HEALTH_PREMIUM_TIERS
        .iter()
        .find(|(from, to, ..)| taxable_income > *from && taxable_income <= *to)
        .map_or(Decimal::ZERO, |(from, _, base, rate, cap)| {
            (*base + (taxable_income - *from) * *rate).min(*cap)
        })
}

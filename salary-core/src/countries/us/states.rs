//! State income and employee payroll tax rules.
//!
//! Married filing separately and head of household use the single column of
//! each state's table.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Region, TaxBracket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSchedule {
    None,
    Flat(Decimal),
    Progressive {
        single: &'static [TaxBracket],
        joint: &'static [TaxBracket],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateDeduction {
    None,
    /// Follows the federal standard deduction for the filing status.
    Federal,
    Fixed { single: Decimal, joint: Decimal },
}

/// Exemption or credit amounts by household size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allowance {
    pub single: Decimal,
    pub joint: Decimal,
    pub per_dependent: Decimal,
}

impl Allowance {
    pub const NONE: Allowance = Allowance::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);

    pub const fn new(
        single: Decimal,
        joint: Decimal,
        per_dependent: Decimal,
    ) -> Self {
        Self {
            single,
            joint,
            per_dependent,
        }
    }
}

/// Extra rate on taxable income above a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surtax {
    pub name: &'static str,
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// Employee-side payroll deduction withheld by the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollTax {
    pub name: &'static str,
    pub rate: Decimal,
    pub wage_base: Option<Decimal>,
    pub annual_max: Option<Decimal>,
}

impl PayrollTax {
    const fn new(
        name: &'static str,
        rate: Decimal,
        wage_base: Option<Decimal>,
    ) -> Self {
        Self {
            name,
            rate,
            wage_base,
            annual_max: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateRules {
    pub code: &'static str,
    pub name: &'static str,
    pub schedule: StateSchedule,
    pub deduction: StateDeduction,
    pub exemption: Allowance,
    pub credit: Allowance,
    pub surtax: Option<Surtax>,
    pub payroll: &'static [PayrollTax],
    /// HSA contributions are added back to state wages.
    pub taxes_hsa: bool,
    /// 401(k) and IRA deferrals are added back to state wages.
    pub taxes_retirement_deferrals: bool,
}

impl StateRules {
    const fn no_tax(
        code: &'static str,
        name: &'static str,
    ) -> Self {
        Self {
            code,
            name,
            schedule: StateSchedule::None,
            deduction: StateDeduction::None,
            exemption: Allowance::NONE,
            credit: Allowance::NONE,
            surtax: None,
            payroll: &[],
            taxes_hsa: false,
            taxes_retirement_deferrals: false,
        }
    }

    pub fn has_income_tax(&self) -> bool {
        !matches!(self.schedule, StateSchedule::None)
    }
}

const CA_SINGLE: [TaxBracket; 9] = [
    TaxBracket::new(dec!(0), dec!(11_079), dec!(0.01)),
    TaxBracket::new(dec!(11_079), dec!(26_264), dec!(0.02)),
    TaxBracket::new(dec!(26_264), dec!(41_452), dec!(0.04)),
    TaxBracket::new(dec!(41_452), dec!(57_542), dec!(0.06)),
    TaxBracket::new(dec!(57_542), dec!(72_724), dec!(0.08)),
    TaxBracket::new(dec!(72_724), dec!(371_479), dec!(0.093)),
    TaxBracket::new(dec!(371_479), dec!(445_771), dec!(0.103)),
    TaxBracket::new(dec!(445_771), dec!(742_953), dec!(0.113)),
    TaxBracket::open(dec!(742_953), dec!(0.123)),
];

const CA_JOINT: [TaxBracket; 9] = [
    TaxBracket::new(dec!(0), dec!(22_158), dec!(0.01)),
    TaxBracket::new(dec!(22_158), dec!(52_528), dec!(0.02)),
    TaxBracket::new(dec!(52_528), dec!(82_904), dec!(0.04)),
    TaxBracket::new(dec!(82_904), dec!(115_084), dec!(0.06)),
    TaxBracket::new(dec!(115_084), dec!(145_448), dec!(0.08)),
    TaxBracket::new(dec!(145_448), dec!(742_958), dec!(0.093)),
    TaxBracket::new(dec!(742_958), dec!(891_542), dec!(0.103)),
    TaxBracket::new(dec!(891_542), dec!(1_485_906), dec!(0.113)),
    TaxBracket::open(dec!(1_485_906), dec!(0.123)),
];

const MN_SINGLE: [TaxBracket; 4] = [
    TaxBracket::new(dec!(0), dec!(32_570), dec!(0.0535)),
    TaxBracket::new(dec!(32_570), dec!(106_990), dec!(0.068)),
    TaxBracket::new(dec!(106_990), dec!(198_630), dec!(0.0785)),
    TaxBracket::open(dec!(198_630), dec!(0.0985)),
];

const MN_JOINT: [TaxBracket; 4] = [
    TaxBracket::new(dec!(0), dec!(47_620), dec!(0.0535)),
    TaxBracket::new(dec!(47_620), dec!(189_180), dec!(0.068)),
    TaxBracket::new(dec!(189_180), dec!(330_410), dec!(0.0785)),
    TaxBracket::open(dec!(330_410), dec!(0.0985)),
];

const NJ_SINGLE: [TaxBracket; 7] = [
    TaxBracket::new(dec!(0), dec!(20_000), dec!(0.014)),
    TaxBracket::new(dec!(20_000), dec!(35_000), dec!(0.0175)),
    TaxBracket::new(dec!(35_000), dec!(40_000), dec!(0.035)),
    TaxBracket::new(dec!(40_000), dec!(75_000), dec!(0.05525)),
    TaxBracket::new(dec!(75_000), dec!(500_000), dec!(0.0637)),
    TaxBracket::new(dec!(500_000), dec!(1_000_000), dec!(0.0897)),
    TaxBracket::open(dec!(1_000_000), dec!(0.1075)),
];

const NJ_JOINT: [TaxBracket; 8] = [
    TaxBracket::new(dec!(0), dec!(20_000), dec!(0.014)),
    TaxBracket::new(dec!(20_000), dec!(50_000), dec!(0.0175)),
    TaxBracket::new(dec!(50_000), dec!(70_000), dec!(0.0245)),
    TaxBracket::new(dec!(70_000), dec!(80_000), dec!(0.035)),
    TaxBracket::new(dec!(80_000), dec!(150_000), dec!(0.05525)),
    TaxBracket::new(dec!(150_000), dec!(500_000), dec!(0.0637)),
    TaxBracket::new(dec!(500_000), dec!(1_000_000), dec!(0.0897)),
    TaxBracket::open(dec!(1_000_000), dec!(0.1075)),
];

const NY_SINGLE: [TaxBracket; 9] = [
    TaxBracket::new(dec!(0), dec!(8_500), dec!(0.04)),
    TaxBracket::new(dec!(8_500), dec!(11_700), dec!(0.045)),
    TaxBracket::new(dec!(11_700), dec!(13_900), dec!(0.0525)),
    TaxBracket::new(dec!(13_900), dec!(80_650), dec!(0.055)),
    TaxBracket::new(dec!(80_650), dec!(215_400), dec!(0.06)),
    TaxBracket::new(dec!(215_400), dec!(1_077_550), dec!(0.0685)),
    TaxBracket::new(dec!(1_077_550), dec!(5_000_000), dec!(0.0965)),
    TaxBracket::new(dec!(5_000_000), dec!(25_000_000), dec!(0.103)),
    TaxBracket::open(dec!(25_000_000), dec!(0.109)),
];

const NY_JOINT: [TaxBracket; 9] = [
    TaxBracket::new(dec!(0), dec!(17_150), dec!(0.04)),
    TaxBracket::new(dec!(17_150), dec!(23_600), dec!(0.045)),
    TaxBracket::new(dec!(23_600), dec!(27_900), dec!(0.0525)),
    TaxBracket::new(dec!(27_900), dec!(161_550), dec!(0.055)),
    TaxBracket::new(dec!(161_550), dec!(323_200), dec!(0.06)),
    TaxBracket::new(dec!(323_200), dec!(2_155_350), dec!(0.0685)),
    TaxBracket::new(dec!(2_155_350), dec!(5_000_000), dec!(0.0965)),
    TaxBracket::new(dec!(5_000_000), dec!(25_000_000), dec!(0.103)),
    TaxBracket::open(dec!(25_000_000), dec!(0.109)),
];

const OR_SINGLE: [TaxBracket; 4] = [
    TaxBracket::new(dec!(0), dec!(4_400), dec!(0.0475)),
    TaxBracket::new(dec!(4_400), dec!(11_050), dec!(0.0675)),
    TaxBracket::new(dec!(11_050), dec!(125_000), dec!(0.0875)),
    TaxBracket::open(dec!(125_000), dec!(0.099)),
];

const OR_JOINT: [TaxBracket; 4] = [
    TaxBracket::new(dec!(0), dec!(8_800), dec!(0.0475)),
    TaxBracket::new(dec!(8_800), dec!(22_100), dec!(0.0675)),
    TaxBracket::new(dec!(22_100), dec!(250_000), dec!(0.0875)),
    TaxBracket::open(dec!(250_000), dec!(0.099)),
];

const VA_BRACKETS: [TaxBracket; 4] = [
    TaxBracket::new(dec!(0), dec!(3_000), dec!(0.02)),
    TaxBracket::new(dec!(3_000), dec!(5_000), dec!(0.03)),
    TaxBracket::new(dec!(5_000), dec!(17_000), dec!(0.05)),
    TaxBracket::open(dec!(17_000), dec!(0.0575)),
];

/// Paid-leave programmes that follow the Social Security wage base.
const SS_WAGE_BASE: Decimal = dec!(176_100);

pub static STATES: [StateRules; 24] = [
    StateRules::no_tax("AK", "Alaska"),
    StateRules {
        schedule: StateSchedule::Flat(dec!(0.025)),
        deduction: StateDeduction::Federal,
        credit: Allowance::new(Decimal::ZERO, Decimal::ZERO, dec!(100)),
        ..StateRules::no_tax("AZ", "Arizona")
    },
    StateRules {
        schedule: StateSchedule::Progressive {
            single: &CA_SINGLE,
            joint: &CA_JOINT,
        },
        deduction: StateDeduction::Fixed {
            single: dec!(5_706),
            joint: dec!(11_412),
        },
        credit: Allowance::new(dec!(153), dec!(306), dec!(475)),
        surtax: Some(Surtax {
            name: "Mental health services tax",
            threshold: dec!(1_000_000),
            rate: dec!(0.01),
        }),
        payroll: &[PayrollTax::new("CA SDI", dec!(0.012), None)],
        taxes_hsa: true,
        ..StateRules::no_tax("CA", "California")
    },
    StateRules {
        schedule: StateSchedule::Flat(dec!(0.044)),
        deduction: StateDeduction::Federal,
        ..StateRules::no_tax("CO", "Colorado")
    },
    StateRules::no_tax("FL", "Florida"),
    StateRules {
        schedule: StateSchedule::Flat(dec!(0.0519)),
        deduction: StateDeduction::Fixed {
            single: dec!(12_000),
            joint: dec!(24_000),
        },
        exemption: Allowance::new(Decimal::ZERO, Decimal::ZERO, dec!(4_000)),
        ..StateRules::no_tax("GA", "Georgia")
    },
    StateRules {
        schedule: StateSchedule::Flat(dec!(0.0495)),
        exemption: Allowance::new(dec!(2_850), dec!(5_700), dec!(2_850)),
        ..StateRules::no_tax("IL", "Illinois")
    },
    StateRules {
        schedule: StateSchedule::Flat(dec!(0.03)),
        exemption: Allowance::new(dec!(1_000), dec!(2_000), dec!(1_500)),
        ..StateRules::no_tax("IN", "Indiana")
    },
    StateRules {
        schedule: StateSchedule::Flat(dec!(0.05)),
        exemption: Allowance::new(dec!(4_400), dec!(8_800), dec!(1_000)),
        surtax: Some(Surtax {
            name: "Millionaire surtax",
            threshold: dec!(1_083_150),
            rate: dec!(0.04),
        }),
        payroll: &[PayrollTax::new("MA PFML", dec!(0.0046), Some(SS_WAGE_BASE))],
        ..StateRules::no_tax("MA", "Massachusetts")
    },
    StateRules {
        schedule: StateSchedule::Flat(dec!(0.0425)),
        exemption: Allowance::new(dec!(5_800), dec!(11_600), dec!(5_800)),
        ..StateRules::no_tax("MI", "Michigan")
    },
    StateRules {
        schedule: StateSchedule::Progressive {
            single: &MN_SINGLE,
            joint: &MN_JOINT,
        },
        deduction: StateDeduction::Fixed {
            single: dec!(14_950),
            joint: dec!(29_900),
        },
        exemption: Allowance::new(Decimal::ZERO, Decimal::ZERO, dec!(5_200)),
        ..StateRules::no_tax("MN", "Minnesota")
    },
    StateRules {
        schedule: StateSchedule::Flat(dec!(0.0425)),
        deduction: StateDeduction::Fixed {
            single: dec!(12_750),
            joint: dec!(25_500),
        },
        ..StateRules::no_tax("NC", "North Carolina")
    },
    StateRules::no_tax("NH", "New Hampshire"),
    StateRules {
        schedule: StateSchedule::Progressive {
            single: &NJ_SINGLE,
            joint: &NJ_JOINT,
        },
        exemption: Allowance::new(dec!(1_000), dec!(2_000), dec!(1_500)),
        payroll: &[
            PayrollTax::new("NJ UI/WF/SWF", dec!(0.00425), Some(dec!(43_300))),
            PayrollTax::new("NJ SDI", dec!(0.0023), Some(dec!(165_400))),
            PayrollTax::new("NJ FLI", dec!(0.0033), Some(dec!(165_400))),
        ],
        taxes_hsa: true,
        ..StateRules::no_tax("NJ", "New Jersey")
    },
    StateRules::no_tax("NV", "Nevada"),
    StateRules {
        schedule: StateSchedule::Progressive {
            single: &NY_SINGLE,
            joint: &NY_JOINT,
        },
        deduction: StateDeduction::Fixed {
            single: dec!(8_000),
            joint: dec!(16_050),
        },
        exemption: Allowance::new(Decimal::ZERO, Decimal::ZERO, dec!(1_000)),
        payroll: &[
            PayrollTax {
                name: "NY SDI",
                rate: dec!(0.005),
                wage_base: None,
                // $0.60 a week
                annual_max: Some(dec!(31.20)),
            },
            PayrollTax::new("NY PFL", dec!(0.00388), Some(dec!(91_373.45))),
        ],
        ..StateRules::no_tax("NY", "New York")
    },
    StateRules {
        schedule: StateSchedule::Progressive {
            single: &OR_SINGLE,
            joint: &OR_JOINT,
        },
        deduction: StateDeduction::Fixed {
            single: dec!(2_835),
            joint: dec!(5_670),
        },
        credit: Allowance::new(dec!(256), dec!(512), dec!(256)),
        payroll: &[
            PayrollTax::new("OR statewide transit", dec!(0.001), None),
            PayrollTax::new("OR Paid Leave", dec!(0.006), Some(SS_WAGE_BASE)),
        ],
        ..StateRules::no_tax("OR", "Oregon")
    },
    StateRules {
        schedule: StateSchedule::Flat(dec!(0.0307)),
        taxes_retirement_deferrals: true,
        ..StateRules::no_tax("PA", "Pennsylvania")
    },
    StateRules::no_tax("SD", "South Dakota"),
    StateRules::no_tax("TN", "Tennessee"),
    StateRules::no_tax("TX", "Texas"),
    StateRules {
        schedule: StateSchedule::Progressive {
            single: &VA_BRACKETS,
            joint: &VA_BRACKETS,
        },
        deduction: StateDeduction::Fixed {
            single: dec!(8_750),
            joint: dec!(17_500),
        },
        exemption: Allowance::new(dec!(930), dec!(1_860), dec!(930)),
        ..StateRules::no_tax("VA", "Virginia")
    },
    StateRules {
        payroll: &[
            PayrollTax::new("WA PFML", dec!(0.006578), Some(SS_WAGE_BASE)),
            PayrollTax::new("WA Cares", dec!(0.0058), None),
        ],
        ..StateRules::no_tax("WA", "Washington")
    },
    StateRules::no_tax("WY", "Wyoming"),
];

/// Selectable states, in the same order as [`STATES`].
pub static REGIONS: [Region; 24] = [
    Region::new("AK", "Alaska"),
    Region::new("AZ", "Arizona"),
    Region::new("CA", "California"),
    Region::new("CO", "Colorado"),
    Region::new("FL", "Florida"),
    Region::new("GA", "Georgia"),
    Region::new("IL", "Illinois"),
    Region::new("IN", "Indiana"),
    Region::new("MA", "Massachusetts"),
    Region::new("MI", "Michigan"),
    Region::new("MN", "Minnesota"),
    Region::new("NC", "North Carolina"),
    Region::new("NH", "New Hampshire"),
    Region::new("NJ", "New Jersey"),
    Region::new("NV", "Nevada"),
    Region::new("NY", "New York"),
    Region::new("OR", "Oregon"),
    Region::new("PA", "Pennsylvania"),
    Region::new("SD", "South Dakota"),
    Region::new("TN", "Tennessee"),
    Region::new("TX", "Texas"),
    Region::new("VA", "Virginia"),
    Region::new("WA", "Washington"),
    Region::new("WY", "Wyoming"),
];

pub fn rules_for(code: &str) -> Option<&'static StateRules> {
    STATES
        .iter()
        .find(|rules| rules.code.eq_ignore_ascii_case(code.trim()))
}

//! Maps the generic questionnaire onto each country's own input record.
//!
//! Every mapping that changes a default records a human-readable note, so a
//! reader can see which options each row of a comparison was computed with.

use rust_decimal::Decimal;

use super::ComparisonAssumptions;
use crate::countries::CountryInputs;
use crate::countries::au::{AuInputs, AuResidency};
use crate::countries::ca::CaInputs;
use crate::countries::ch::ChInputs;
use crate::countries::de::DeInputs;
use crate::countries::hk::HkInputs;
use crate::countries::id::IdInputs;
use crate::countries::kr::KrInputs;
use crate::countries::nl::NlInputs;
use crate::countries::pt::{PtInputs, PtRegime};
use crate::countries::sg::{SgInputs, SgResidency};
use crate::countries::th::ThInputs;
use crate::countries::tw::TwInputs;
use crate::countries::uk::UkInputs;
use crate::countries::us::{FilingStatus, UsInputs};
use crate::models::{CalculatorInputs, ContributionLimits, CountryCode, MaritalStatus, PayFrequency};

/// Comparisons report monthly per-period figures for every country.
pub const COMPARISON_FREQUENCY: PayFrequency = PayFrequency::Monthly;

/// Age from which the Dutch state pension (AOW) applies.
const NL_AOW_AGE: u8 = 67;
/// Indonesia allows PTKP relief for at most three dependents.
const ID_MAX_DEPENDENTS: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedInputs {
    pub inputs: CalculatorInputs,
    pub assumptions: Vec<String>,
}

/// Builds `code`'s inputs for a salary already converted to local currency.
pub fn synthesize(
    code: CountryCode,
    gross_local: Decimal,
    assumptions: &ComparisonAssumptions,
) -> SynthesizedInputs {
    let mut notes = Notes::default();
    let a = assumptions;
    let inputs = match code {
        CountryCode::Us => CalculatorInputs::Us(united_states(gross_local, a, &mut notes)),
        CountryCode::Sg => CalculatorInputs::Sg(singapore(gross_local, a, &mut notes)),
        CountryCode::Kr => CalculatorInputs::Kr(korea(gross_local, a, &mut notes)),
        CountryCode::Nl => CalculatorInputs::Nl(netherlands(gross_local, a, &mut notes)),
        CountryCode::Au => CalculatorInputs::Au(australia(gross_local, a, &mut notes)),
        CountryCode::Pt => CalculatorInputs::Pt(portugal(gross_local, a, &mut notes)),
        CountryCode::Th => CalculatorInputs::Th(thailand(gross_local, a, &mut notes)),
        CountryCode::Hk => CalculatorInputs::Hk(hong_kong(gross_local, a, &mut notes)),
        CountryCode::Id => CalculatorInputs::Id(indonesia(gross_local, a, &mut notes)),
        CountryCode::Tw => CalculatorInputs::Tw(taiwan(gross_local, a, &mut notes)),
        CountryCode::Uk => CalculatorInputs::Uk(united_kingdom(gross_local, a, &mut notes)),
        CountryCode::De => CalculatorInputs::De(germany(gross_local, a, &mut notes)),
        CountryCode::Ca => CalculatorInputs::Ca(canada(gross_local, a, &mut notes)),
        CountryCode::Ch => CalculatorInputs::Ch(switzerland(gross_local, a, &mut notes)),
    };
    SynthesizedInputs {
        inputs,
        assumptions: notes.0,
    }
}

#[derive(Debug, Default)]
struct Notes(Vec<String>);

impl Notes {
    fn push(
        &mut self,
        note: impl Into<String>,
    ) {
        self.0.push(note.into());
    }

    fn children(
        &mut self,
        count: u8,
        relief: &str,
    ) {
        match count {
            0 => {}
            1 => self.push(format!("1 child ({relief})")),
            n => self.push(format!("{n} children ({relief})")),
        }
    }

    fn retirement(
        &mut self,
        accounts: &str,
    ) {
        self.push(format!("Retirement: {accounts} at the limit"));
    }
}

fn limit(
    limits: &ContributionLimits,
    kind: &str,
) -> Decimal {
    limits.get(kind).map_or(Decimal::ZERO, |l| l.limit)
}

fn united_states(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> UsInputs {
    let mut inputs = UsInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        age: a.age,
        children: a.children,
        ..UsInputs::default()
    };
    if a.is_married() {
        inputs.filing_status = FilingStatus::MarriedFilingJointly;
        notes.push("Married filing jointly");
    } else if a.is_single_parent() {
        inputs.filing_status = FilingStatus::HeadOfHousehold;
        notes.push("Head of household");
    }
    if inputs.set_region(&a.us_state) {
        notes.push(format!("State: {}", inputs.state));
    } else {
        notes.push(format!("Unknown state '{}', using {}", a.us_state, inputs.state));
    }
    notes.children(a.children, "child tax credit");
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.traditional_401k = limit(&limits, "traditional_401k");
        inputs.contributions.traditional_ira = limit(&limits, "traditional_ira");
        notes.retirement("traditional 401(k) and IRA");
    }
    inputs
}

fn singapore(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> SgInputs {
    let mut inputs = SgInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        age: a.age,
        ..SgInputs::default()
    };
    if !a.resident {
        inputs.residency = SgResidency::Foreigner;
        inputs.tax_resident = false;
        notes.push("Foreigner, non-resident for tax (no CPF)");
    }
    if a.is_married() {
        inputs.reliefs.spouse = true;
        notes.push("Spouse relief");
    }
    inputs.reliefs.qualifying_children = a.children;
    notes.children(a.children, "qualifying child relief");
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.srs = limit(&limits, "srs");
        notes.retirement("SRS");
    }
    inputs
}

fn korea(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> KrInputs {
    let mut inputs = KrInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        children: a.children,
        ..KrInputs::default()
    };
    if a.is_married() {
        inputs.spouse = true;
        notes.push("Spouse personal deduction");
    }
    notes.children(a.children, "personal deduction and child credit");
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.pension_savings = limit(&limits, "pension_savings");
        inputs.contributions.irp = limit(&limits, "irp");
        notes.retirement("pension savings and IRP");
    }
    inputs
}

fn netherlands(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> NlInputs {
    let mut inputs = NlInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        above_aow_age: a.age >= NL_AOW_AGE,
        ..NlInputs::default()
    };
    if inputs.above_aow_age {
        notes.push("Above AOW age");
    }
    if a.special_regimes.nl_thirty_percent_ruling {
        inputs.thirty_percent_ruling = true;
        notes.push("30% ruling");
    }
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.pension = limit(&limits, "pension");
        notes.retirement("pension (annual room)");
    }
    inputs
}

fn australia(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> AuInputs {
    let mut inputs = AuInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        dependents: a.children,
        ..AuInputs::default()
    };
    if !a.resident {
        inputs.residency = AuResidency::NonResident;
        notes.push("Non-resident rates");
    }
    if a.is_married() {
        inputs.has_spouse = true;
        notes.push("Family Medicare thresholds");
    }
    notes.children(a.children, "Medicare levy thresholds");
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.salary_sacrifice = limit(&limits, "salary_sacrifice");
        notes.retirement("concessional super");
    }
    inputs
}

fn portugal(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> PtInputs {
    let mut inputs = PtInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        dependents: a.children,
        age: a.age,
        ..PtInputs::default()
    };
    if !a.resident {
        inputs.regime = PtRegime::NonResident;
        notes.push("Non-resident flat rate");
    } else if a.special_regimes.pt_ifici {
        inputs.regime = PtRegime::Ifici;
        notes.push("IFICI regime");
    }
    if a.is_married() {
        inputs.marital_status = MaritalStatus::Married;
        inputs.joint_filing = true;
        notes.push("Joint filing");
    }
    notes.children(a.children, "dependent deduction");
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.ppr = limit(&limits, "ppr");
        notes.retirement("PPR");
    }
    inputs
}

fn thailand(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> ThInputs {
    let mut inputs = ThInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        children: a.children,
        ..ThInputs::default()
    };
    if a.is_married() {
        inputs.spouse_allowance = true;
        notes.push("Spouse allowance");
    }
    notes.children(a.children, "child allowance");
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.provident_fund = limit(&limits, "provident_fund");
        inputs.contributions.rmf = limit(&limits, "rmf");
        notes.retirement("provident fund and RMF");
    }
    inputs
}

fn hong_kong(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> HkInputs {
    let mut inputs = HkInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        children: a.children,
        ..HkInputs::default()
    };
    if a.is_married() {
        inputs.marital_status = MaritalStatus::Married;
        notes.push("Married person's allowance");
    } else if a.is_single_parent() {
        inputs.single_parent = true;
        notes.push("Single parent allowance");
    }
    notes.children(a.children, "child allowance");
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.tvc = limit(&limits, "tvc");
        notes.retirement("MPF TVC");
    }
    inputs
}

fn indonesia(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> IdInputs {
    let mut inputs = IdInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        dependents: a.children.min(ID_MAX_DEPENDENTS),
        ..IdInputs::default()
    };
    if a.is_married() {
        inputs.marital_status = MaritalStatus::Married;
        notes.push("Married PTKP");
    }
    notes.children(inputs.dependents, "PTKP dependents");
    if a.children > ID_MAX_DEPENDENTS {
        notes.push(format!("Dependents capped at {ID_MAX_DEPENDENTS}"));
    }
    inputs
}

fn taiwan(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> TwInputs {
    let mut inputs = TwInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        dependents: a.children,
        age: a.age,
        resident: a.resident,
        ..TwInputs::default()
    };
    if !a.resident {
        notes.push("Non-resident withholding");
    }
    if a.is_married() {
        inputs.marital_status = MaritalStatus::Married;
        notes.push("Married standard deduction and spouse exemption");
    }
    notes.children(a.children, "dependent exemptions");
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.voluntary_pension = limit(&limits, "voluntary_pension");
        notes.retirement("voluntary labour pension");
    }
    inputs
}

fn united_kingdom(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> UkInputs {
    let mut inputs = UkInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        ..UkInputs::default()
    };
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.salary_sacrifice = limit(&limits, "salary_sacrifice");
        notes.retirement("salary sacrifice pension");
    }
    inputs
}

fn germany(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> DeInputs {
    let mut inputs = DeInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        children: a.children,
        age: a.age,
        ..DeInputs::default()
    };
    if a.is_married() {
        inputs.marital_status = MaritalStatus::Married;
        notes.push("Income splitting");
    } else if a.is_single_parent() {
        inputs.single_parent = true;
        notes.push("Single parent relief");
    }
    notes.children(a.children, "child allowance and care insurance");
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.bav = limit(&limits, "bav");
        notes.retirement("bAV salary conversion");
    }
    inputs
}

fn canada(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> CaInputs {
    let mut inputs = CaInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        ..CaInputs::default()
    };
    if a.is_married() {
        inputs.marital_status = MaritalStatus::Married;
        notes.push("Spouse amount");
    }
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.rrsp = limit(&limits, "rrsp");
        notes.retirement("RRSP");
    }
    inputs
}

fn switzerland(
    gross: Decimal,
    a: &ComparisonAssumptions,
    notes: &mut Notes,
) -> ChInputs {
    let mut inputs = ChInputs {
        gross_salary: gross,
        pay_frequency: COMPARISON_FREQUENCY,
        children: a.children,
        age: a.age,
        ..ChInputs::default()
    };
    if a.is_married() {
        inputs.marital_status = MaritalStatus::Married;
        notes.push("Married tariff");
    }
    notes.children(a.children, "child deductions");
    if a.max_retirement() {
        let limits = inputs.contribution_limits();
        inputs.contributions.pillar_3a = limit(&limits, "pillar_3a");
        notes.retirement("pillar 3a");
    }
    inputs
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::comparison::RetirementContributions;

    fn married_with(children: u8) -> ComparisonAssumptions {
        ComparisonAssumptions {
            marital_status: MaritalStatus::Married,
            children,
            ..ComparisonAssumptions::default()
        }
    }

    #[test]
    fn every_country_gets_its_own_inputs() {
        let defaults = ComparisonAssumptions::default();
        for code in CountryCode::ALL {
            let synthesized = synthesize(code, dec!(100_000), &defaults);

            assert_eq!(synthesized.inputs.country(), code);
            assert_eq!(synthesized.inputs.gross_salary(), dec!(100_000));
            assert_eq!(synthesized.inputs.pay_frequency(), COMPARISON_FREQUENCY);
        }
    }

    #[test]
    fn married_maps_to_joint_filing_in_the_us() {
        let synthesized = synthesize(CountryCode::Us, dec!(100_000), &married_with(2));

        let CalculatorInputs::Us(us) = synthesized.inputs else {
            panic!("expected US inputs");
        };
        assert_eq!(us.filing_status, FilingStatus::MarriedFilingJointly);
        assert_eq!(us.children, 2);
        assert!(synthesized.assumptions.contains(&"Married filing jointly".to_string()));
        assert!(synthesized.assumptions.contains(&"2 children (child tax credit)".to_string()));
    }

    #[test]
    fn single_parents_use_head_of_household_and_single_parent_forms() {
        let parent = ComparisonAssumptions {
            children: 1,
            ..ComparisonAssumptions::default()
        };

        let CalculatorInputs::Us(us) = synthesize(CountryCode::Us, dec!(1), &parent).inputs else {
            panic!("expected US inputs");
        };
        let CalculatorInputs::Hk(hk) = synthesize(CountryCode::Hk, dec!(1), &parent).inputs else {
            panic!("expected HK inputs");
        };
        let CalculatorInputs::De(de) = synthesize(CountryCode::De, dec!(1), &parent).inputs else {
            panic!("expected DE inputs");
        };

        assert_eq!(us.filing_status, FilingStatus::HeadOfHousehold);
        assert!(hk.single_parent);
        assert!(de.single_parent);
    }

    #[test]
    fn non_residents_get_non_resident_treatment() {
        let abroad = ComparisonAssumptions {
            resident: false,
            ..ComparisonAssumptions::default()
        };

        let CalculatorInputs::Sg(sg) = synthesize(CountryCode::Sg, dec!(1), &abroad).inputs else {
            panic!("expected SG inputs");
        };
        let CalculatorInputs::Pt(pt) = synthesize(CountryCode::Pt, dec!(1), &abroad).inputs else {
            panic!("expected PT inputs");
        };

        assert_eq!(sg.residency, SgResidency::Foreigner);
        assert!(!sg.tax_resident);
        assert_eq!(pt.regime, PtRegime::NonResident);
    }

    #[test]
    fn indonesian_dependents_are_capped() {
        let synthesized = synthesize(CountryCode::Id, dec!(1), &married_with(5));

        let CalculatorInputs::Id(id) = &synthesized.inputs else {
            panic!("expected ID inputs");
        };
        assert_eq!(id.dependents, 3);
        assert!(synthesized.assumptions.contains(&"Dependents capped at 3".to_string()));
    }

    #[test]
    fn unknown_us_state_keeps_default_and_says_so() {
        let nowhere = ComparisonAssumptions {
            us_state: "XX".to_string(),
            ..ComparisonAssumptions::default()
        };

        let synthesized = synthesize(CountryCode::Us, dec!(1), &nowhere);

        assert_eq!(synthesized.inputs.region(), Some("CA".to_string()));
        assert!(synthesized.assumptions.contains(&"Unknown state 'XX', using CA".to_string()));
    }

    #[test]
    fn max_retirement_fills_elections_to_their_limits() {
        let saver = ComparisonAssumptions {
            retirement_contributions: RetirementContributions::Max,
            ..ComparisonAssumptions::default()
        };

        let synthesized = synthesize(CountryCode::Us, dec!(200_000), &saver);

        let CalculatorInputs::Us(us) = &synthesized.inputs else {
            panic!("expected US inputs");
        };
        assert_eq!(us.contributions.traditional_401k, dec!(23_500));
        assert_eq!(us.contributions.traditional_ira, dec!(7_000));
        assert!(
            synthesized
                .assumptions
                .contains(&"Retirement: traditional 401(k) and IRA at the limit".to_string())
        );
    }

    #[test]
    fn special_regimes_are_opt_in() {
        let mut expat = ComparisonAssumptions::default();
        expat.special_regimes.nl_thirty_percent_ruling = true;
        expat.special_regimes.pt_ifici = true;

        let CalculatorInputs::Nl(nl) = synthesize(CountryCode::Nl, dec!(1), &expat).inputs else {
            panic!("expected NL inputs");
        };
        let CalculatorInputs::Pt(pt) = synthesize(CountryCode::Pt, dec!(1), &expat).inputs else {
            panic!("expected PT inputs");
        };

        assert!(nl.thirty_percent_ruling);
        assert_eq!(pt.regime, PtRegime::Ifici);
    }
}

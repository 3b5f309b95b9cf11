use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ContributionLimits, CountryCode, PayFrequency};
use crate::countries::{
    CountryInputs, au::AuInputs, ca::CaInputs, ch::ChInputs, de::DeInputs, hk::HkInputs,
    id::IdInputs, kr::KrInputs, nl::NlInputs, pt::PtInputs, sg::SgInputs, th::ThInputs,
    tw::TwInputs, uk::UkInputs, us::UsInputs,
};

/// Calculator inputs for one country, tagged by country code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "country", rename_all = "UPPERCASE")]
pub enum CalculatorInputs {
    Us(UsInputs),
    Sg(SgInputs),
    Kr(KrInputs),
    Nl(NlInputs),
    Au(AuInputs),
    Pt(PtInputs),
    Th(ThInputs),
    Hk(HkInputs),
    Id(IdInputs),
    Tw(TwInputs),
    Uk(UkInputs),
    De(DeInputs),
    Ca(CaInputs),
    Ch(ChInputs),
}

macro_rules! each_country {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            CalculatorInputs::Us($inner) => $body,
            CalculatorInputs::Sg($inner) => $body,
            CalculatorInputs::Kr($inner) => $body,
            CalculatorInputs::Nl($inner) => $body,
            CalculatorInputs::Au($inner) => $body,
            CalculatorInputs::Pt($inner) => $body,
            CalculatorInputs::Th($inner) => $body,
            CalculatorInputs::Hk($inner) => $body,
            CalculatorInputs::Id($inner) => $body,
            CalculatorInputs::Tw($inner) => $body,
            CalculatorInputs::Uk($inner) => $body,
            CalculatorInputs::De($inner) => $body,
            CalculatorInputs::Ca($inner) => $body,
            CalculatorInputs::Ch($inner) => $body,
        }
    };
}

impl CalculatorInputs {
    pub fn country(&self) -> CountryCode {
        match self {
            Self::Us(_) => CountryCode::Us,
            Self::Sg(_) => CountryCode::Sg,
            Self::Kr(_) => CountryCode::Kr,
            Self::Nl(_) => CountryCode::Nl,
            Self::Au(_) => CountryCode::Au,
            Self::Pt(_) => CountryCode::Pt,
            Self::Th(_) => CountryCode::Th,
            Self::Hk(_) => CountryCode::Hk,
            Self::Id(_) => CountryCode::Id,
            Self::Tw(_) => CountryCode::Tw,
            Self::Uk(_) => CountryCode::Uk,
            Self::De(_) => CountryCode::De,
            Self::Ca(_) => CountryCode::Ca,
            Self::Ch(_) => CountryCode::Ch,
        }
    }

    /// Default inputs for a country, as a UI would pre-fill them.
    pub fn default_for(code: CountryCode) -> Self {
        match code {
            CountryCode::Us => Self::Us(UsInputs::default()),
            CountryCode::Sg => Self::Sg(SgInputs::default()),
            CountryCode::Kr => Self::Kr(KrInputs::default()),
            CountryCode::Nl => Self::Nl(NlInputs::default()),
            CountryCode::Au => Self::Au(AuInputs::default()),
            CountryCode::Pt => Self::Pt(PtInputs::default()),
            CountryCode::Th => Self::Th(ThInputs::default()),
            CountryCode::Hk => Self::Hk(HkInputs::default()),
            CountryCode::Id => Self::Id(IdInputs::default()),
            CountryCode::Tw => Self::Tw(TwInputs::default()),
            CountryCode::Uk => Self::Uk(UkInputs::default()),
            CountryCode::De => Self::De(DeInputs::default()),
            CountryCode::Ca => Self::Ca(CaInputs::default()),
            CountryCode::Ch => Self::Ch(ChInputs::default()),
        }
    }

    pub fn gross_salary(&self) -> Decimal {
        each_country!(self, inputs => inputs.gross_salary())
    }

    pub fn pay_frequency(&self) -> PayFrequency {
        each_country!(self, inputs => inputs.pay_frequency())
    }

    pub fn region(&self) -> Option<String> {
        each_country!(self, inputs => inputs.region())
    }

    pub fn contribution_limits(&self) -> ContributionLimits {
        each_country!(self, inputs => inputs.contribution_limits())
    }

    /// Shapes the inputs into the form every calculator assumes: elections
    /// within their limits, exclusive reliefs resolved, counts within caps.
    pub fn normalized(self) -> Self {
        match self {
            Self::Us(inputs) => Self::Us(inputs.normalized()),
            Self::Sg(inputs) => Self::Sg(inputs.normalized()),
            Self::Kr(inputs) => Self::Kr(inputs.normalized()),
            Self::Nl(inputs) => Self::Nl(inputs.normalized()),
            Self::Au(inputs) => Self::Au(inputs.normalized()),
            Self::Pt(inputs) => Self::Pt(inputs.normalized()),
            Self::Th(inputs) => Self::Th(inputs.normalized()),
            Self::Hk(inputs) => Self::Hk(inputs.normalized()),
            Self::Id(inputs) => Self::Id(inputs.normalized()),
            Self::Tw(inputs) => Self::Tw(inputs.normalized()),
            Self::Uk(inputs) => Self::Uk(inputs.normalized()),
            Self::De(inputs) => Self::De(inputs.normalized()),
            Self::Ca(inputs) => Self::Ca(inputs.normalized()),
            Self::Ch(inputs) => Self::Ch(inputs.normalized()),
        }
    }

    pub fn with_gross_salary(
        mut self,
        gross_salary: Decimal,
    ) -> Self {
        each_country!(&mut self, inputs => inputs.set_gross_salary(gross_salary));
        self
    }

    pub fn with_pay_frequency(
        mut self,
        frequency: PayFrequency,
    ) -> Self {
        each_country!(&mut self, inputs => inputs.set_pay_frequency(frequency));
        self
    }

    /// Sets the state/province/canton/region where the country has one;
    /// ignored elsewhere. Returns `false` when the code was not accepted.
    pub fn set_region(
        &mut self,
        region: &str,
    ) -> bool {
        each_country!(self, inputs => inputs.set_region(region))
    }
}

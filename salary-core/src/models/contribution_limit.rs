use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

/// Statutory bound on a single contribution election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionLimit {
    pub limit: Decimal,
    pub name: &'static str,
    pub description: &'static str,
    /// Whether the contribution is taken from pay before income tax.
    pub pre_tax: bool,
}

impl ContributionLimit {
    pub fn new(
        limit: Decimal,
        name: &'static str,
        description: &'static str,
        pre_tax: bool,
    ) -> Self {
        Self {
            limit,
            name,
            description,
            pre_tax,
        }
    }
}

/// One ceiling enforced jointly across several election kinds.
///
/// Members are clamped in declaration order: earlier members keep their
/// election and later members receive whatever headroom is left.
/// `reserved` is headroom already used by a contribution that is not an
/// election (for example an employer contribution counted against the same
/// cap).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedCeiling {
    pub name: &'static str,
    pub limit: Decimal,
    pub reserved: Decimal,
    pub members: Vec<&'static str>,
}

impl SharedCeiling {
    pub fn new(
        name: &'static str,
        limit: Decimal,
        members: &[&'static str],
    ) -> Self {
        Self {
            name,
            limit,
            reserved: Decimal::ZERO,
            members: members.to_vec(),
        }
    }

    pub fn with_reserved(
        mut self,
        reserved: Decimal,
    ) -> Self {
        self.reserved = reserved.max(Decimal::ZERO);
        self
    }

    /// Headroom left for member elections once `reserved` is taken out.
    pub fn headroom(&self) -> Decimal {
        (self.limit - self.reserved).max(Decimal::ZERO)
    }
}

/// Per-country limits keyed by contribution kind, plus shared ceilings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionLimits {
    pub limits: BTreeMap<&'static str, ContributionLimit>,
    pub shared: Vec<SharedCeiling>,
}

impl ContributionLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        kind: &'static str,
        limit: ContributionLimit,
    ) -> Self {
        self.limits.insert(kind, limit);
        self
    }

    pub fn with_shared(
        mut self,
        ceiling: SharedCeiling,
    ) -> Self {
        self.shared.push(ceiling);
        self
    }

    pub fn get(
        &self,
        kind: &str,
    ) -> Option<&ContributionLimit> {
        self.limits.get(kind)
    }

    /// Individual limit for `kind`; kinds without an entry are unbounded.
    pub fn limit_for(
        &self,
        kind: &str,
    ) -> Decimal {
        self.get(kind).map_or(Decimal::MAX, |l| l.limit)
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

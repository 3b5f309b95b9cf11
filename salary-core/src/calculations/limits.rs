//! Clamping of contribution elections to statutory limits.
//!
//! Enforcement runs in three passes:
//!
//! 1. every election is clamped to `[0, individual limit]`;
//! 2. every [`SharedCeiling`](crate::models::SharedCeiling) is applied to its
//!    members in declared priority order, after subtracting any reserved
//!    headroom;
//! 3. the elections together are bounded by the salary available to fund
//!    them, again in declaration order.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::ContributionLimits;

/// A mutable view of one contribution election.
#[derive(Debug)]
pub struct Election<'a> {
    pub kind: &'static str,
    pub amount: &'a mut Decimal,
}

impl<'a> Election<'a> {
    pub fn new(
        kind: &'static str,
        amount: &'a mut Decimal,
    ) -> Self {
        Self { kind, amount }
    }
}

/// Clamps `elections` in place.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::{Election, enforce_limits};
/// use salary_core::{ContributionLimit, ContributionLimits, SharedCeiling};
///
/// let limits = ContributionLimits::new()
///     .with("traditional", ContributionLimit::new(dec!(23500), "Traditional", "", true))
///     .with("roth", ContributionLimit::new(dec!(23500), "Roth", "", false))
///     .with_shared(SharedCeiling::new("Deferrals", dec!(23500), &["traditional", "roth"]));
///
/// let mut traditional = dec!(20000);
/// let mut roth = dec!(10000);
/// enforce_limits(
///     &limits,
///     &mut [
///         Election::new("traditional", &mut traditional),
///         Election::new("roth", &mut roth),
///     ],
///     dec!(100000),
/// );
///
/// assert_eq!(traditional, dec!(20000));
/// assert_eq!(roth, dec!(3500));
/// ```
pub fn enforce_limits(
    limits: &ContributionLimits,
    elections: &mut [Election<'_>],
    available: Decimal,
) {
    for election in elections.iter_mut() {
        let limit = limits.limit_for(election.kind);
        let clamped = (*election.amount).max(Decimal::ZERO).min(limit);
        if clamped != *election.amount {
            warn!(
                kind = election.kind,
                requested = %election.amount,
                limit = %limit,
                "contribution clamped to its statutory limit"
            );
        }
        *election.amount = clamped;
    }

    for ceiling in &limits.shared {
        let mut remaining = ceiling.headroom();
        for member in &ceiling.members {
            let Some(election) = elections.iter_mut().find(|e| e.kind == *member) else {
                continue;
            };
            let allowed = (*election.amount).min(remaining);
            if allowed != *election.amount {
                warn!(
                    kind = election.kind,
                    ceiling = ceiling.name,
                    requested = %election.amount,
                    allowed = %allowed,
                    "contribution clamped to a shared ceiling"
                );
            }
            *election.amount = allowed;
            remaining -= allowed;
        }
    }

    let mut remaining = available.max(Decimal::ZERO);
    for election in elections.iter_mut() {
        let allowed = (*election.amount).min(remaining);
        if allowed != *election.amount {
            warn!(
                kind = election.kind,
                requested = %election.amount,
                available = %remaining,
                "contribution exceeds the salary available to fund it"
            );
        }
        *election.amount = allowed;
        remaining -= allowed;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{ContributionLimit, SharedCeiling};

    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn deferral_limits() -> ContributionLimits {
        ContributionLimits::new()
            .with(
                "traditional",
                ContributionLimit::new(dec!(23500), "Traditional", "pre-tax deferral", true),
            )
            .with(
                "roth",
                ContributionLimit::new(dec!(23500), "Roth", "post-tax deferral", false),
            )
            .with(
                "hsa",
                ContributionLimit::new(dec!(4300), "HSA", "health savings", true),
            )
            .with_shared(SharedCeiling::new(
                "Elective deferrals",
                dec!(23500),
                &["traditional", "roth"],
            ))
    }

    #[test]
    fn individual_limit_clamps_single_election() {
        let _guard = init_test_tracing();
        let limits = deferral_limits();
        let mut hsa = dec!(9000);

        enforce_limits(&limits, &mut [Election::new("hsa", &mut hsa)], dec!(100000));

        assert_eq!(hsa, dec!(4300));
    }

    #[test]
    fn negative_election_becomes_zero() {
        let limits = deferral_limits();
        let mut hsa = dec!(-100);

        enforce_limits(&limits, &mut [Election::new("hsa", &mut hsa)], dec!(100000));

        assert_eq!(hsa, dec!(0));
    }

    #[test]
    fn shared_ceiling_keeps_priority_member_first() {
        let _guard = init_test_tracing();
        let limits = deferral_limits();
        let mut traditional = dec!(23500);
        let mut roth = dec!(23500);

        enforce_limits(
            &limits,
            &mut [
                Election::new("roth", &mut roth),
                Election::new("traditional", &mut traditional),
            ],
            dec!(200000),
        );

        // Priority follows the ceiling's member order, not the slice order.
        assert_eq!(traditional, dec!(23500));
        assert_eq!(roth, dec!(0));
    }

    #[test]
    fn shared_ceiling_leaves_elections_within_cap_untouched() {
        let limits = deferral_limits();
        let mut traditional = dec!(10000);
        let mut roth = dec!(5000);

        enforce_limits(
            &limits,
            &mut [
                Election::new("traditional", &mut traditional),
                Election::new("roth", &mut roth),
            ],
            dec!(200000),
        );

        assert_eq!(traditional, dec!(10000));
        assert_eq!(roth, dec!(5000));
    }

    #[test]
    fn reserved_headroom_is_consumed_first() {
        let limits = ContributionLimits::new().with_shared(
            SharedCeiling::new("Concessional cap", dec!(30000), &["salary_sacrifice"])
                .with_reserved(dec!(12000)),
        );
        let mut sacrifice = dec!(25000);

        enforce_limits(
            &limits,
            &mut [Election::new("salary_sacrifice", &mut sacrifice)],
            dec!(100000),
        );

        assert_eq!(sacrifice, dec!(18000));
    }

    #[test]
    fn reserved_headroom_above_limit_leaves_nothing() {
        let ceiling =
            SharedCeiling::new("Concessional cap", dec!(30000), &["x"]).with_reserved(dec!(40000));

        assert_eq!(ceiling.headroom(), dec!(0));
    }

    #[test]
    fn available_salary_bounds_elections_in_order() {
        let _guard = init_test_tracing();
        let limits = deferral_limits();
        let mut traditional = dec!(20000);
        let mut hsa = dec!(4300);

        enforce_limits(
            &limits,
            &mut [
                Election::new("traditional", &mut traditional),
                Election::new("hsa", &mut hsa),
            ],
            dec!(22000),
        );

        assert_eq!(traditional, dec!(20000));
        assert_eq!(hsa, dec!(2000));
    }

    #[test]
    fn unknown_kind_is_only_bounded_by_salary() {
        let limits = ContributionLimits::new();
        let mut other = dec!(50000);

        enforce_limits(&limits, &mut [Election::new("other", &mut other)], dec!(30000));

        assert_eq!(other, dec!(30000));
    }
}

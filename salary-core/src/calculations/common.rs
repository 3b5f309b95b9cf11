//! Rounding and clamping helpers.
//!
//! Rounding granularity differs per jurisdiction (cents, whole units, tens of
//! won, thousands of rupiah). Each calculator picks the helper matching its
//! convention and applies it per sub-component.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const MONTHS: Decimal = dec!(12);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds half-up to a whole currency unit.
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Drops everything below a whole currency unit.
pub fn floor_whole(value: Decimal) -> Decimal {
    value.floor()
}

/// Rounds down to a multiple of `step` (e.g. 10 won, 1,000 rupiah).
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::floor_to;
///
/// assert_eq!(floor_to(dec!(56_400_999), dec!(1000)), dec!(56_400_000));
/// assert_eq!(floor_to(dec!(1234.5), dec!(10)), dec!(1230));
/// ```
pub fn floor_to(
    value: Decimal,
    step: Decimal,
) -> Decimal {
    if step <= Decimal::ZERO {
        return value;
    }
    (value / step).floor() * step
}

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps a subtraction step at zero.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// `numerator / denominator`, or zero when the denominator is not positive.
pub fn ratio(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// Monthly wage under the even-distribution assumption.
pub fn monthly(annual: Decimal) -> Decimal {
    annual / MONTHS
}

/// Annualises a monthly amount.
pub fn annualize(monthly: Decimal) -> Decimal {
    monthly * MONTHS
}

/// `rate × min(monthly wage, ceiling) × 12`: a contribution whose wage
/// ceiling is evaluated per month and then annualised.
pub fn monthly_capped_contribution(
    annual_wage: Decimal,
    rate: Decimal,
    monthly_ceiling: Decimal,
) -> Decimal {
    annualize(rate * monthly(non_negative(annual_wage)).min(monthly_ceiling))
}

/// `rate × min(wage, ceiling)` on an annual wage base.
pub fn capped_contribution(
    wage: Decimal,
    rate: Decimal,
    ceiling: Option<Decimal>,
) -> Decimal {
    let base = non_negative(wage);
    let base = match ceiling {
        Some(ceiling) => base.min(ceiling),
        None => base,
    };
    base * rate
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(0.005)), dec!(0.01));
        assert_eq!(round_half_up(dec!(0.004)), dec!(0.00));
    }

    #[test]
    fn round_whole_rounds_to_units() {
        assert_eq!(round_whole(dec!(874.5)), dec!(875));
        assert_eq!(round_whole(dec!(874.49)), dec!(874));
    }

    #[test]
    fn floor_to_ignores_non_positive_step() {
        assert_eq!(floor_to(dec!(15.7), dec!(0)), dec!(15.7));
    }

    #[test]
    fn non_negative_clamps_at_zero() {
        assert_eq!(non_negative(dec!(-1)), dec!(0));
        assert_eq!(non_negative(dec!(5)), dec!(5));
    }

    #[test]
    fn ratio_is_zero_for_zero_denominator() {
        assert_eq!(ratio(dec!(10), dec!(0)), dec!(0));
        assert_eq!(ratio(dec!(10), dec!(40)), dec!(0.25));
    }

    #[test]
    fn monthly_capped_contribution_caps_each_month() {
        // 120,000 / 12 = 10,000 per month, capped at 7,400.
        let result = monthly_capped_contribution(dec!(120000), dec!(0.20), dec!(7400));

        assert_eq!(result, dec!(17760.00));
    }

    #[test]
    fn monthly_capped_contribution_below_ceiling() {
        let result = monthly_capped_contribution(dec!(60000), dec!(0.20), dec!(7400));

        assert_eq!(result, dec!(12000));
    }

    #[test]
    fn capped_contribution_without_ceiling() {
        assert_eq!(
            capped_contribution(dec!(50000), dec!(0.011), None),
            dec!(550.000)
        );
        assert_eq!(
            capped_contribution(dec!(200000), dec!(0.011), Some(dec!(148200))),
            dec!(1630.200)
        );
    }
}

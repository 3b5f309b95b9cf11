//! Progressive bracket tax.
//!
//! Each bracket taxes only the slice of income that falls inside it:
//! `Σ rate × max(0, min(income, max) − min)`. Schedules are validated by
//! [`validate_brackets`]: contiguous, ascending, starting at zero, open-ended
//! at the top, with non-decreasing rates.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TaxBracket;

/// Structural problems in a bracket schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketError {
    #[error("bracket schedule is empty")]
    Empty,

    #[error("first bracket must start at 0, starts at {0}")]
    FirstMinNotZero(Decimal),

    #[error("bracket {index} starts at {found}, expected {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {0} is open-ended but is not the last bracket")]
    OpenBracketNotLast(usize),

    #[error("last bracket must be open-ended")]
    LastBracketBounded,

    #[error("bracket {index} has an empty or inverted range")]
    EmptyRange { index: usize },

    #[error("bracket {index} rate {rate} is lower than the previous bracket")]
    DecreasingRate { index: usize, rate: Decimal },
}

/// Tax on `income` under `brackets`, unrounded.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::TaxBracket;
/// use salary_core::calculations::progressive_tax;
///
/// const SCHEDULE: &[TaxBracket] = &[
///     TaxBracket::new(dec!(0), dec!(10000), dec!(0.10)),
///     TaxBracket::open(dec!(10000), dec!(0.20)),
/// ];
///
/// assert_eq!(progressive_tax(dec!(15000), SCHEDULE), dec!(2000));
/// ```
pub fn progressive_tax(
    income: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    brackets
        .iter()
        .map(|b| b.slice_of(income) * b.tax_rate)
        .sum()
}

/// Rate of the bracket containing the last unit of `income`.
pub fn marginal_rate(
    income: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    if income <= Decimal::ZERO {
        return brackets.first().map_or(Decimal::ZERO, |b| b.tax_rate);
    }
    brackets
        .iter()
        .find(|b| b.contains(income))
        .or_else(|| brackets.last())
        .map_or(Decimal::ZERO, |b| b.tax_rate)
}

/// Checks the schedule invariants.
///
/// # Errors
///
/// Returns the first [`BracketError`] found, scanning in ascending order.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), BracketError> {
    let first = brackets.first().ok_or(BracketError::Empty)?;
    if first.min_income != Decimal::ZERO {
        return Err(BracketError::FirstMinNotZero(first.min_income));
    }

    let last_index = brackets.len() - 1;
    let mut previous: Option<&TaxBracket> = None;
    for (index, bracket) in brackets.iter().enumerate() {
        if let Some(prev) = previous {
            let expected = prev.max_income.ok_or(BracketError::OpenBracketNotLast(index - 1))?;
            if bracket.min_income != expected {
                return Err(BracketError::NotContiguous {
                    index,
                    expected,
                    found: bracket.min_income,
                });
            }
            if bracket.tax_rate < prev.tax_rate {
                return Err(BracketError::DecreasingRate {
                    index,
                    rate: bracket.tax_rate,
                });
            }
        }
        match bracket.max_income {
            Some(max) if max <= bracket.min_income => {
                return Err(BracketError::EmptyRange { index });
            }
            Some(_) if index == last_index => return Err(BracketError::LastBracketBounded),
            None if index != last_index => return Err(BracketError::OpenBracketNotLast(index)),
            _ => {}
        }
        previous = Some(bracket);
    }
    Ok(())
}

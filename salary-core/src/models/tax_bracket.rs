use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal-rate slice of a progressive schedule.
///
/// The interval is half-open: income above `min_income` up to and including
/// `max_income` is taxed at `tax_rate`. `max_income` is `None` for the
/// open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub const fn new(
        min_income: Decimal,
        max_income: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income: Some(max_income),
            tax_rate,
        }
    }

    /// The open-ended top bracket of a schedule.
    pub const fn open(
        min_income: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income: None,
            tax_rate,
        }
    }

    /// Part of `income` that falls inside this bracket, never negative.
    pub fn slice_of(
        &self,
        income: Decimal,
    ) -> Decimal {
        let upper = match self.max_income {
            Some(max) => income.min(max),
            None => income,
        };
        (upper - self.min_income).max(Decimal::ZERO)
    }

    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income > self.min_income && self.max_income.is_none_or(|max| income <= max)
    }
}

//! Shared building blocks for the per-country calculators.
//!
//! Every jurisdiction instantiates the same skeleton (contributions, taxable
//! income, bracket tax, credits, totals) from the pieces in this module.

pub mod brackets;
pub mod common;
pub mod limits;
pub mod summary;

pub use brackets::{BracketError, marginal_rate, progressive_tax, validate_brackets};
pub use limits::{Election, enforce_limits};
pub use summary::ResultBuilder;

//! Two-decimal amounts as stored on records: money in rupees and paise,
//! weights to the nearest 10 g.
//!
//! Arithmetic on stored amounts runs on `Decimal`. An `f64` input is read as
//! its shortest round-trip decimal (`1.005`, not `1.00499…`), and results are
//! rounded half away from zero to whole paise before converting back.

use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DomainError, DomainResult};

/// Decimal places kept on stored amounts.
pub const AMOUNT_DP: u32 = 2;

fn out_of_range(field: &str) -> DomainError {
    DomainError::validation(format!("{field} is out of range"))
}

/// Exact decimal value of `value` as written.
pub fn decimal(field: &str, value: f64) -> DomainResult<Decimal> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!(
            "{field} must be a finite number (got {value})"
        )));
    }
    Decimal::from_str(&value.to_string()).map_err(|_| out_of_range(field))
}

/// Unwrap a checked `Decimal` operation, reporting overflow against `field`.
pub fn checked(field: &str, value: Option<Decimal>) -> DomainResult<Decimal> {
    value.ok_or_else(|| out_of_range(field))
}

/// Round to paise, half away from zero.
pub fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(AMOUNT_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounded amount in paise.
pub fn to_paise(field: &str, value: Decimal) -> DomainResult<i64> {
    let paise = checked(field, round(value).checked_mul(Decimal::from(100)))?;
    paise.to_i64().ok_or_else(|| out_of_range(field))
}

pub fn from_paise(paise: i64) -> f64 {
    paise as f64 / 100.0
}

/// Round a `Decimal` result and hand it back as a stored `f64` amount.
pub fn amount(field: &str, value: Decimal) -> DomainResult<f64> {
    Ok(from_paise(to_paise(field, value)?))
}

/// Round an `f64` to a stored amount.
pub fn round_amount(field: &str, value: f64) -> DomainResult<f64> {
    amount(field, decimal(field, value)?)
}

/// Sum stored amounts without `f64` drift.
pub fn sum_amounts(field: &str, values: &[f64]) -> DomainResult<f64> {
    let mut total = Decimal::ZERO;
    for value in values {
        total = checked(field, total.checked_add(decimal(field, *value)?))?;
    }
    amount(field, total)
}

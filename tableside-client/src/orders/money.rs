//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts travel as `f64` on the wire. Sums are computed in `Decimal` and
//! rounded to 2 places (half-up) before being converted back.

use rust_decimal::prelude::*;

use shared::models::Order;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Σ unit price × quantity
pub fn subtotal<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (f64, i32)>,
{
    let sum: Decimal = lines
        .into_iter()
        .map(|(price, quantity)| to_decimal(price) * Decimal::from(quantity))
        .sum();
    to_f64(sum)
}

/// subtotal + tax − discount
pub fn order_total(subtotal: f64, tax: f64, discount: f64) -> f64 {
    to_f64(to_decimal(subtotal) + to_decimal(tax) - to_decimal(discount))
}

/// Whether `total == subtotal + tax − discount` within a cent
pub fn totals_consistent(order: &Order) -> bool {
    let expected = to_decimal(order.subtotal) + to_decimal(order.tax) - to_decimal(order.discount);
    (expected - to_decimal(order.total)).abs() <= MONEY_TOLERANCE
}

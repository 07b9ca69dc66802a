//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done on `Decimal` internally, then converted back to
//! `f64` for storage/serialization. Totals obey the order invariant
//! `total = max(0, subtotal - discount + tip)` at all times.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

use crate::traits::OrderError;
use shared::order::command::CartLineInput;
use shared::order::snapshot::{LineItem, OrderSnapshot};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per item
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed tip
const MAX_TIP: f64 = 1_000_000.0;

pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), OrderError> {
    if !value.is_finite() {
        return Err(OrderError::InvalidAmount(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a cart line before it becomes an immutable line item.
pub fn validate_cart_line(line: &CartLineInput) -> Result<(), OrderError> {
    require_finite(line.unit_price, "unit_price")?;
    if line.unit_price < 0.0 {
        return Err(OrderError::InvalidAmount(format!(
            "unit_price must be non-negative, got {}",
            line.unit_price
        )));
    }
    if line.unit_price > MAX_PRICE {
        return Err(OrderError::InvalidAmount(format!(
            "unit_price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, line.unit_price
        )));
    }
    if line.quantity <= 0 {
        return Err(OrderError::InvalidAmount(format!(
            "quantity must be positive, got {}",
            line.quantity
        )));
    }
    if line.quantity > MAX_QUANTITY {
        return Err(OrderError::InvalidAmount(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, line.quantity
        )));
    }
    Ok(())
}

/// Validate a tip amount at payment time.
pub fn validate_tip(tip: f64) -> Result<(), OrderError> {
    require_finite(tip, "tip")?;
    if tip < 0.0 {
        return Err(OrderError::InvalidAmount(format!(
            "tip must be non-negative, got {}",
            tip
        )));
    }
    if tip > MAX_TIP {
        return Err(OrderError::InvalidAmount(format!(
            "tip exceeds maximum allowed ({}), got {}",
            MAX_TIP, tip
        )));
    }
    Ok(())
}

/// Line total: unit_price * quantity.
pub fn line_total(item: &LineItem) -> Decimal {
    to_decimal(item.unit_price) * Decimal::from(item.quantity)
}

/// Recompute subtotal and total from the line items and the current
/// discount/tip, clamping the total at zero.
pub fn recalculate_totals(snapshot: &mut OrderSnapshot) {
    let subtotal: Decimal = snapshot.items.iter().map(line_total).sum();
    let total = subtotal - to_decimal(snapshot.discount) + to_decimal(snapshot.tip);
    snapshot.subtotal = to_f64(subtotal);
    snapshot.total = to_f64(total.max(Decimal::ZERO));
}

/// Final amount for a settlement: `max(0, subtotal - discount + tip)`.
pub fn settle_total(subtotal: f64, discount: f64, tip: f64) -> f64 {
    let total = to_decimal(subtotal) - to_decimal(discount) + to_decimal(tip);
    to_f64(total.max(Decimal::ZERO))
}

/// Compare two monetary values within tolerance.
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() <= MONEY_TOLERANCE
}

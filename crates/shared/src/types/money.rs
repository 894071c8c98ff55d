//! Decimal helpers for monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Balances are carried as full-precision `rust_decimal::Decimal` values and are
//! only rounded when shown to a user or emitted in a transfer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits used when displaying amounts.
pub const DISPLAY_SCALE: u32 = 2;

/// Magnitude below which a running balance counts as settled (0.01).
pub const SETTLEMENT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Rounds an amount to `scale` fractional digits using Banker's Rounding.
///
/// Midpoints go to the nearest even digit, so `0.125` becomes `0.12` and
/// `0.135` becomes `0.14`. The result always carries exactly `scale` digits,
/// so `30` renders as `30.00`.
#[must_use]
pub fn round_for_display(amount: Decimal, scale: u32) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(scale);
    rounded
}

/// Returns true if `amount` is strictly closer to zero than `tolerance`.
#[must_use]
pub fn is_negligible(amount: Decimal, tolerance: Decimal) -> bool {
    amount.abs() < tolerance
}

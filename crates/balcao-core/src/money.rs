//! # Money Module
//!
//! Exact-decimal helpers for monetary values and quantities.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A building-materials counter sells fractional quantities               │
//! │  (2.5 m³ of sand, 0.75 m³ of gravel), so totals multiply a             │
//! │  fractional quantity by a price. Floats drift; `Decimal` does not.     │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal in the domain, integer cents on disk       │
//! │    • All arithmetic happens on `Decimal` (exact, 28 digits)            │
//! │    • Currency is persisted as integer cents (scale 2)                  │
//! │    • Quantity is persisted as integer thousandths (scale 3)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use balcao_core::money;
//! use rust_decimal::Decimal;
//!
//! let price: Decimal = "25.50".parse().unwrap();
//! let qty: Decimal = "2.5".parse().unwrap();
//!
//! // Persisted subtotals are rounded half-up to 2 decimal places
//! let subtotal = money::round_currency(price * qty); // 63.75
//! assert_eq!(money::to_cents(subtotal), 6375);
//! ```

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places stored for currency amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Number of decimal places stored for quantities.
///
/// Matches the persisted column scale: bulk materials are sold down to
/// thousandths of a unit (e.g. 0.125 m³).
pub const QUANTITY_SCALE: u32 = 3;

/// Rounds a monetary value to 2 decimal places, half-up.
///
/// "Half-up" here is midpoint-away-from-zero: `2.345 → 2.35` and
/// `-2.345 → -2.35`. This is the rounding applied to line-item subtotals
/// when an order is persisted; transient cart views keep the raw product.
///
/// ## Example
/// ```rust
/// use balcao_core::money::round_currency;
/// use rust_decimal::Decimal;
///
/// let raw: Decimal = "2.345".parse().unwrap();
/// assert_eq!(round_currency(raw).to_string(), "2.35");
/// ```
#[inline]
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a monetary value to integer cents for storage.
///
/// The value is rounded to currency scale first, so this is lossless for
/// any amount that has already passed through [`round_currency`].
#[inline]
pub fn to_cents(value: Decimal) -> i64 {
    scaled_integer(round_currency(value), CURRENCY_SCALE)
}

/// Converts integer cents back to an exact decimal amount.
#[inline]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, CURRENCY_SCALE)
}

/// Converts a quantity to integer thousandths for storage.
///
/// Quantities beyond 3 decimal places are rounded half-up, matching the
/// persisted column scale.
#[inline]
pub fn to_milli(quantity: Decimal) -> i64 {
    let rounded =
        quantity.round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    scaled_integer(rounded, QUANTITY_SCALE)
}

/// Converts integer thousandths back to an exact decimal quantity.
#[inline]
pub fn from_milli(milli: i64) -> Decimal {
    Decimal::new(milli, QUANTITY_SCALE)
}

/// Formats an amount for status messages and receipts (`R$ 1234.56`).
///
/// ## Note
/// This is for backend-produced strings. The frontend formats its own
/// values for locale-aware display.
pub fn format_brl(value: Decimal) -> String {
    format!("R$ {:.2}", value)
}

/// Shifts a decimal with scale <= `scale` into an integer at that scale.
fn scaled_integer(value: Decimal, scale: u32) -> i64 {
    let factor = 10i128.pow(scale.saturating_sub(value.scale()));
    (value.mantissa() * factor) as i64
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(round_currency(dec("2.345")), dec("2.35"));
        assert_eq!(round_currency(dec("2.344")), dec("2.34"));
        assert_eq!(round_currency(dec("2.005")), dec("2.01"));
        // Away from zero on negatives, like BigDecimal HALF_UP
        assert_eq!(round_currency(dec("-2.345")), dec("-2.35"));
    }

    #[test]
    fn test_round_currency_no_op_below_scale() {
        assert_eq!(round_currency(dec("10")), dec("10"));
        assert_eq!(round_currency(dec("10.5")), dec("10.5"));
    }

    #[test]
    fn test_cents_round_trip() {
        assert_eq!(to_cents(dec("25.50")), 2550);
        assert_eq!(to_cents(dec("0.01")), 1);
        assert_eq!(to_cents(dec("-5.50")), -550);
        assert_eq!(from_cents(2550), dec("25.50"));
        assert_eq!(from_cents(to_cents(dec("1234.56"))), dec("1234.56"));
    }

    #[test]
    fn test_cents_rounds_first() {
        // 10.005 rounds half-up to 10.01 before conversion
        assert_eq!(to_cents(dec("10.005")), 1001);
        // Integral values have scale 0 and still convert correctly
        assert_eq!(to_cents(dec("7")), 700);
    }

    #[test]
    fn test_milli_round_trip() {
        assert_eq!(to_milli(dec("2.5")), 2500);
        assert_eq!(to_milli(dec("0.125")), 125);
        assert_eq!(from_milli(2500), dec("2.500"));
        // Beyond scale 3 rounds half-up
        assert_eq!(to_milli(dec("0.0005")), 1);
        assert_eq!(to_milli(dec("0.0004")), 0);
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(dec("1234.5")), "R$ 1234.50");
        assert_eq!(format_brl(dec("0")), "R$ 0.00");
    }
}

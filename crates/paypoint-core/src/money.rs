//! # Money Module
//!
//! Rounding and conversion rules for monetary values.
//!
//! ## Why Fixed-Point Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A price modifier of 1.01 is really 1.0100000000000000088817...        │
//! │  and rounding UP to cents turns that noise into a whole extra cent     │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    100.30 × 1.01 = 101.3030 exactly → round up → 101.31                │
//! │    Every intermediate value is exact; only the final step rounds       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Rules
//! - Final price: up (away from zero) to [`CURRENCY_SCALE`] places
//! - Points: down (toward zero) to whole units
//!
//! ## Usage
//! ```rust
//! use paypoint_core::money::{round_up_to_cents, round_down_to_units};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(round_up_to_cents(dec!(101.303)), Some(dec!(101.31)));
//! assert_eq!(round_down_to_units(dec!(6.015)), dec!(6));
//! ```

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ValidationError, ValidationResult};

/// Number of fractional digits carried by prices (cents).
pub const CURRENCY_SCALE: u32 = 2;

/// Largest amount that still carries [`CURRENCY_SCALE`] places:
/// `792281625142643375935439503.35`.
pub const MAX_AMOUNT: Decimal =
    Decimal::from_parts(u32::MAX, u32::MAX, u32::MAX, false, CURRENCY_SCALE);

/// Rounds an amount up to whole cents.
///
/// Any remainder beyond the second decimal moves the value away from
/// zero, so a non-negative amount is never under-charged. The result always
/// carries exactly two decimal places (`100` becomes `100.00`).
///
/// Returns `None` when the amount is too large to carry two decimal places,
/// i.e. above [`MAX_AMOUNT`].
///
/// ## Example
/// ```rust
/// use paypoint_core::money::round_up_to_cents;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_up_to_cents(dec!(190.475)).unwrap().to_string(), "190.48");
/// assert_eq!(round_up_to_cents(dec!(95)).unwrap().to_string(), "95.00");
/// assert!(round_up_to_cents(dec!(792281625142643375935439504)).is_none());
/// ```
pub fn round_up_to_cents(amount: Decimal) -> Option<Decimal> {
    let mut rounded = amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::AwayFromZero);
    // rescale falls back to the largest scale that fits instead of failing
    rounded.rescale(CURRENCY_SCALE);
    (rounded.scale() == CURRENCY_SCALE).then_some(rounded)
}

/// Multiplies two decimals, returning `None` unless the product is exact.
///
/// `checked_mul` only fails once the integer part overflows; before that
/// rust_decimal quietly drops fractional digits to make the product fit,
/// which would let a sub-cent remainder escape [`round_up_to_cents`].
///
/// ```rust
/// use paypoint_core::money::exact_mul;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(exact_mul(dec!(100.30), dec!(1.01)), Some(dec!(101.3030)));
/// assert_eq!(exact_mul(dec!(700000000000000000000000000.01), dec!(1.01)), None);
/// ```
pub fn exact_mul(a: Decimal, b: Decimal) -> Option<Decimal> {
    let product = a.checked_mul(b)?;
    (product.is_zero() || product.scale() == a.scale() + b.scale()).then_some(product)
}

/// Adds two decimals, returning `None` unless the sum is exact.
///
/// Same failure modes as [`exact_mul`]: a sum past `Decimal::MAX`, or one
/// that only fits by dropping cents.
pub fn exact_add(a: Decimal, b: Decimal) -> Option<Decimal> {
    let sum = a.checked_add(b)?;
    let exact = a.is_zero() || b.is_zero() || sum.scale() == a.scale().max(b.scale());
    exact.then_some(sum)
}

/// Truncates an amount to whole units.
///
/// ## Example
/// ```rust
/// use paypoint_core::money::round_down_to_units;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_down_to_units(dec!(5.015)).to_string(), "5");
/// assert_eq!(round_down_to_units(dec!(0.99)).to_string(), "0");
/// ```
pub fn round_down_to_units(amount: Decimal) -> Decimal {
    let mut truncated = amount.round_dp_with_strategy(0, RoundingStrategy::ToZero);
    truncated.rescale(0);
    truncated
}

/// Converts a double received at the API boundary into an exact decimal.
///
/// ## Conversion Rule
/// The value goes through its shortest round-trip decimal string, so `1.01`
/// becomes exactly `1.01` and never `1.0100000000000000088817841970012523`.
/// This is deterministic: the same double always yields the same decimal.
///
/// ## Errors
/// - NaN or infinity
/// - Magnitudes that do not fit a 96-bit decimal
pub fn decimal_from_f64(field: &str, value: f64) -> ValidationResult<Decimal> {
    if !value.is_finite() {
        return Err(ValidationError::invalid_format(
            field,
            "must be a finite number",
        ));
    }

    Decimal::from_str(&value.to_string())
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

/// Formats a rule bound as a decimal literal for error messages.
///
/// Trailing zeros are dropped but at least one fractional digit is kept:
/// `0.90` → `0.9`, `1.00` → `1.0`, `1.02` → `1.02`.
pub fn format_bound(value: &Decimal) -> String {
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        format!("{}.0", normalized)
    } else {
        normalized.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

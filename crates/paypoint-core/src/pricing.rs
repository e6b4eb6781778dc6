//! # Pricing Module
//!
//! Turns an accepted [`PaymentRequest`] into a [`PricedPayment`].
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Example: CASH_ON_DELIVERY, price 100.30, modifier 1.01                 │
//! │                                                                         │
//! │  final_price = round_up(100.30 × 1.01, 2)                              │
//! │              = round_up(101.3030, 2)          = 101.31                 │
//! │                                                                         │
//! │  points      = round_down(100.30 × 0.05, 0)                            │
//! │              = round_down(5.0150, 0)          = 5                      │
//! │                                                                         │
//! │  additional_item_json = {"courier":"YAMATO"}                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Points are computed from the base price, not the final price.
//!
//! Both products must be exact. A price whose product would overflow or
//! lose fractional digits is rejected as a validation error instead.

use crate::error::{CoreResult, ValidationError};
use crate::money::{exact_mul, round_down_to_units, round_up_to_cents};
use crate::rules::rule_for;
use crate::types::{PaymentRequest, PricedPayment};
use crate::validation::validate_payment;

/// Validates and prices a payment request.
///
/// This is the only way to obtain a [`PricedPayment`]; a request that fails
/// validation never reaches the arithmetic.
///
/// ## Errors
/// - [`crate::CoreError::Validation`] when a rule rejects the request, or
///   the price is too large to price exactly
/// - [`crate::CoreError::Serialization`] if the additional items cannot be
///   encoded as JSON
pub fn price_payment(request: PaymentRequest) -> CoreResult<PricedPayment> {
    validate_payment(&request)?;

    let rule = rule_for(request.payment_method);
    let final_price = exact_mul(request.price, request.price_modifier)
        .and_then(round_up_to_cents)
        .ok_or_else(|| ValidationError::out_of_range("price"))?;
    let points = exact_mul(request.price, rule.points_rate)
        .map(round_down_to_units)
        .ok_or_else(|| ValidationError::out_of_range("price"))?;
    let additional_item_json = serde_json::to_string(&request.additional_item)?;

    Ok(PricedPayment {
        request,
        final_price,
        points,
        additional_item_json,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

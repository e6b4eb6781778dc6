//! # Validation Module
//!
//! Applies the payment method rules to a submitted request.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_payment(request)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rule_for(request.payment_method)                                       │
//! │       │                                                                 │
//! │       ├── additional items fail schema?                                 │
//! │       │      → "Incorrect additional items"   (range is NOT checked)    │
//! │       │                                                                 │
//! │       ├── modifier outside [min, max]?                                  │
//! │       │      → "Price modifier is not in allowed range: min to max"     │
//! │       │                                                                 │
//! │       └── OK → request is accepted unchanged                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of the request and the static rule
//! table, so validating the same request twice gives the same answer.
//!
//! ## Usage
//! ```rust
//! use paypoint_core::validation::validate_price_modifier;
//! use paypoint_core::PaymentMethod;
//! use rust_decimal_macros::dec;
//!
//! assert!(validate_price_modifier(PaymentMethod::Cash, dec!(0.95)).is_ok());
//! assert!(validate_price_modifier(PaymentMethod::Cash, dec!(1.05)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationResult};
use crate::rules::rule_for;
use crate::types::{AdditionalItems, PaymentMethod, PaymentRequest};

// =============================================================================
// Payment Validators
// =============================================================================

/// Validates a payment request against its method's rule.
///
/// The additional item schema is checked first; a schema failure is reported
/// even when the modifier is also out of range.
pub fn validate_payment(request: &PaymentRequest) -> ValidationResult<()> {
    validate_additional_items(request.payment_method, &request.additional_item)?;
    validate_price_modifier(request.payment_method, request.price_modifier)?;
    Ok(())
}

/// Checks additional items against the method's schema.
pub fn validate_additional_items(
    method: PaymentMethod,
    items: &AdditionalItems,
) -> ValidationResult<()> {
    if !rule_for(method).accepts_items(items) {
        return Err(ValidationError::IncorrectAdditionalItems);
    }

    Ok(())
}

/// Checks the modifier against the method's inclusive range.
pub fn validate_price_modifier(method: PaymentMethod, modifier: Decimal) -> ValidationResult<()> {
    let rule = rule_for(method);
    if !rule.accepts_modifier(modifier) {
        return Err(ValidationError::PriceModifierOutOfRange {
            min: rule.modifier_min,
            max: rule.modifier_max,
        });
    }

    Ok(())
}

// =============================================================================
// Input Validators
// =============================================================================

/// Validates a base price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed
///
/// ## Example
/// ```rust
/// use paypoint_core::validation::validate_price;
/// use rust_decimal_macros::dec;
///
/// assert!(validate_price(dec!(100.30)).is_ok());
/// assert!(validate_price(dec!(0)).is_ok());
/// assert!(validate_price(dec!(-1)).is_err());
/// ```
pub fn validate_price(price: Decimal) -> ValidationResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    fn request(
        method: PaymentMethod,
        modifier: Decimal,
        items: &[(&str, &str)],
    ) -> PaymentRequest {
        PaymentRequest {
            customer_id: "12345".to_string(),
            price: dec!(100.00),
            price_modifier: modifier,
            payment_method: method,
            datetime: DateTime::parse_from_rfc3339("2022-09-01T00:00:00Z").unwrap(),
            additional_item: items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn assert_incorrect_items(req: PaymentRequest) {
        assert_eq!(
            validate_payment(&req),
            Err(ValidationError::IncorrectAdditionalItems),
            "{:?}",
            req
        );
    }

    #[test]
    fn test_valid_request_per_method() {
        let cases = [
            request(PaymentMethod::Cash, dec!(0.9), &[]),
            request(PaymentMethod::CashOnDelivery, dec!(1.01), &[("courier", "YAMATO")]),
            request(PaymentMethod::Visa, dec!(0.95), &[("last4", "1234")]),
            request(PaymentMethod::Mastercard, dec!(1), &[("last4", "5678")]),
            request(PaymentMethod::Amex, dec!(1.01), &[("last4", "0000")]),
            request(PaymentMethod::Jcb, dec!(0.97), &[("last4", "9999")]),
            request(PaymentMethod::LinePay, dec!(1), &[]),
            request(PaymentMethod::Paypay, dec!(1), &[]),
            request(PaymentMethod::Points, dec!(1), &[]),
            request(PaymentMethod::GrabPay, dec!(1), &[]),
            request(
                PaymentMethod::BankTransfer,
                dec!(1),
                &[("bank", "MUFG"), ("accountNumber", "1234567")],
            ),
            request(
                PaymentMethod::Cheque,
                dec!(0.9),
                &[("bank", "MUFG"), ("chequeNumber", "0001")],
            ),
        ];

        for req in cases {
            assert_eq!(validate_payment(&req), Ok(()), "{:?}", req);
            // idempotent
            assert_eq!(validate_payment(&req), Ok(()));
        }
    }

    #[test]
    fn test_cash_with_items_is_rejected_regardless_of_modifier() {
        assert_incorrect_items(request(PaymentMethod::Cash, dec!(1), &[("note", "x")]));
        // out-of-range modifier is not reported: items fail first
        assert_incorrect_items(request(PaymentMethod::Cash, dec!(5), &[("note", "x")]));
    }

    #[test]
    fn test_cash_modifier_out_of_range() {
        let err = validate_payment(&request(PaymentMethod::Cash, dec!(1.05), &[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Price modifier is not in allowed range: 0.9 to 1.0"
        );
    }

    #[test]
    fn test_out_of_range_messages_use_method_bounds() {
        let err = validate_price_modifier(PaymentMethod::CashOnDelivery, dec!(0.99)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Price modifier is not in allowed range: 1.0 to 1.02"
        );

        let err = validate_price_modifier(PaymentMethod::Amex, dec!(0.5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Price modifier is not in allowed range: 0.98 to 1.01"
        );

        let err = validate_price_modifier(PaymentMethod::Points, dec!(1.0001)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Price modifier is not in allowed range: 1.0 to 1.0"
        );
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(validate_price_modifier(PaymentMethod::Cash, dec!(0.90)).is_ok());
        assert!(validate_price_modifier(PaymentMethod::Cash, dec!(1.00)).is_ok());
        assert!(validate_price_modifier(PaymentMethod::Cash, dec!(0.8999)).is_err());
        assert!(validate_price_modifier(PaymentMethod::CashOnDelivery, dec!(1.02)).is_ok());
    }

    #[test]
    fn test_invalid_additional_item_fixtures() {
        // AMEX last4 with three digits
        assert_incorrect_items(request(PaymentMethod::Amex, dec!(1), &[("last4", "123")]));
        // BANK_TRANSFER missing accountNumber / missing bank
        assert_incorrect_items(request(PaymentMethod::BankTransfer, dec!(1), &[("bank", "MUFG")]));
        assert_incorrect_items(request(
            PaymentMethod::BankTransfer,
            dec!(1),
            &[("accountNumber", "1234567")],
        ));
        // CASH_ON_DELIVERY invalid courier / missing courier / extra item
        assert_incorrect_items(request(
            PaymentMethod::CashOnDelivery,
            dec!(1),
            &[("courier", "FEDEX")],
        ));
        assert_incorrect_items(request(PaymentMethod::CashOnDelivery, dec!(1), &[]));
        assert_incorrect_items(request(
            PaymentMethod::CashOnDelivery,
            dec!(1),
            &[("courier", "YAMATO"), ("extra", "item")],
        ));
        // CHEQUE missing chequeNumber / missing bank
        assert_incorrect_items(request(PaymentMethod::Cheque, dec!(1), &[("bank", "MUFG")]));
        assert_incorrect_items(request(
            PaymentMethod::Cheque,
            dec!(1),
            &[("chequeNumber", "0001")],
        ));
        // JCB missing last4
        assert_incorrect_items(request(PaymentMethod::Jcb, dec!(1), &[]));
        // MASTERCARD letters in last4
        assert_incorrect_items(request(PaymentMethod::Mastercard, dec!(1), &[("last4", "12ab")]));
        // VISA with no last4 field
        assert_incorrect_items(request(PaymentMethod::Visa, dec!(1), &[("card", "1234")]));
    }

    #[test]
    fn test_accepts_iff_schema_and_range() {
        let modifiers = [dec!(0.5), dec!(0.9), dec!(0.95), dec!(1), dec!(1.01), dec!(1.02), dec!(2)];
        let item_sets: [&[(&str, &str)]; 4] = [
            &[],
            &[("last4", "4321")],
            &[("courier", "SAGAWA")],
            &[("bank", "B"), ("accountNumber", "1")],
        ];

        for method in PaymentMethod::ALL {
            let rule = rule_for(method);
            for modifier in modifiers {
                for items in item_sets {
                    let req = request(method, modifier, items);
                    let expected = rule.accepts_items(&req.additional_item)
                        && rule.modifier_min <= modifier
                        && modifier <= rule.modifier_max;
                    assert_eq!(validate_payment(&req).is_ok(), expected, "{:?}", req);
                }
            }
        }
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(dec!(0)).is_ok());
        assert!(validate_price(dec!(200.50)).is_ok());
        assert_eq!(
            validate_price(dec!(-0.01)),
            Err(ValidationError::MustNotBeNegative {
                field: "price".to_string()
            })
        );
    }
}

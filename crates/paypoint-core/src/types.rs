//! # Domain Types
//!
//! Core domain types used throughout Paypoint.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   validate + price   ┌─────────────────┐          │
//! │  │ PaymentRequest  │ ───────────────────► │  PricedPayment  │          │
//! │  │  ─────────────  │                      │  ─────────────  │          │
//! │  │  customer_id    │                      │  request fields │          │
//! │  │  price          │                      │  final_price    │          │
//! │  │  price_modifier │                      │  points         │          │
//! │  │  payment_method │                      │  item JSON text │          │
//! │  │  datetime       │                      └────────┬────────┘          │
//! │  │  additional_item│                               │ record            │
//! │  └─────────────────┘                               ▼                   │
//! │                                              ┌───────────┐             │
//! │  ┌─────────────────┐   aggregate_hourly      │  storage  │             │
//! │  │   SaleBucket    │ ◄────────────────────── │SaleRecord │             │
//! │  │  hour, totals   │                         └───────────┘             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Method-specific auxiliary data (card last4, courier, bank details).
///
/// Insertion order is preserved so the stored JSON text matches what the
/// client sent.
pub type AdditionalItems = IndexMap<String, String>;

// =============================================================================
// Payment Method
// =============================================================================

/// A payment channel. Each variant has its own rule in [`crate::rules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    CashOnDelivery,
    Visa,
    Mastercard,
    Amex,
    Jcb,
    LinePay,
    Paypay,
    Points,
    GrabPay,
    BankTransfer,
    Cheque,
}

impl PaymentMethod {
    /// Every payment method, in declaration order.
    pub const ALL: [PaymentMethod; 12] = [
        PaymentMethod::Cash,
        PaymentMethod::CashOnDelivery,
        PaymentMethod::Visa,
        PaymentMethod::Mastercard,
        PaymentMethod::Amex,
        PaymentMethod::Jcb,
        PaymentMethod::LinePay,
        PaymentMethod::Paypay,
        PaymentMethod::Points,
        PaymentMethod::GrabPay,
        PaymentMethod::BankTransfer,
        PaymentMethod::Cheque,
    ];

    /// Wire and storage identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::CashOnDelivery => "CASH_ON_DELIVERY",
            PaymentMethod::Visa => "VISA",
            PaymentMethod::Mastercard => "MASTERCARD",
            PaymentMethod::Amex => "AMEX",
            PaymentMethod::Jcb => "JCB",
            PaymentMethod::LinePay => "LINE_PAY",
            PaymentMethod::Paypay => "PAYPAY",
            PaymentMethod::Points => "POINTS",
            PaymentMethod::GrabPay => "GRAB_PAY",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Cheque => "CHEQUE",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownPaymentMethod(s.to_string()))
    }
}

// =============================================================================
// Payment Request
// =============================================================================

/// A payment as submitted by a client, before any rule has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub customer_id: String,
    /// Base price in currency units.
    pub price: Decimal,
    /// Multiplier applied to `price`, already converted to an exact decimal.
    pub price_modifier: Decimal,
    pub payment_method: PaymentMethod,
    pub datetime: DateTime<FixedOffset>,
    #[serde(default)]
    pub additional_item: AdditionalItems,
}

// =============================================================================
// Priced Payment
// =============================================================================

/// An accepted payment with its final price and loyalty points.
///
/// Only [`crate::pricing::price_payment`] creates these, so holding one means
/// the request passed validation. Fields are read through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedPayment {
    pub(crate) request: PaymentRequest,
    pub(crate) final_price: Decimal,
    pub(crate) points: Decimal,
    pub(crate) additional_item_json: String,
}

impl PricedPayment {
    pub fn customer_id(&self) -> &str {
        &self.request.customer_id
    }

    pub fn price(&self) -> Decimal {
        self.request.price
    }

    pub fn price_modifier(&self) -> Decimal {
        self.request.price_modifier
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.request.payment_method
    }

    /// Timestamp as submitted, offset included.
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.request.datetime
    }

    /// Timestamp normalised to UTC, as stored and bucketed.
    pub fn datetime_utc(&self) -> DateTime<Utc> {
        self.request.datetime.with_timezone(&Utc)
    }

    pub fn additional_item(&self) -> &AdditionalItems {
        &self.request.additional_item
    }

    /// Additional items as a JSON object string, insertion order kept.
    pub fn additional_item_json(&self) -> &str {
        &self.additional_item_json
    }

    /// Price after the modifier, rounded up to cents.
    pub fn final_price(&self) -> Decimal {
        self.final_price
    }

    /// Loyalty points, truncated to whole units.
    pub fn points(&self) -> Decimal {
        self.points
    }

    /// The public view returned to the client.
    pub fn response(&self) -> PaymentResponse {
        PaymentResponse {
            final_price: self.final_price,
            points: self.points,
        }
    }
}

/// Public result of a submitted payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub final_price: Decimal,
    pub points: Decimal,
}

// =============================================================================
// Sales Aggregation
// =============================================================================

/// The slice of a stored payment that hourly aggregation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleRecord {
    pub datetime: DateTime<Utc>,
    pub final_price: Decimal,
    pub points: Decimal,
}

/// Totals for one hour. Recomputed per query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleBucket {
    /// Start of the hour, UTC.
    #[serde(rename = "datetime")]
    pub hour_timestamp: DateTime<Utc>,
    #[serde(rename = "sales")]
    pub total_sales: Decimal,
    #[serde(rename = "points")]
    pub total_points: Decimal,
}

/// An inclusive time window for sales queries.
///
/// A window whose start is after its end matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a range from any offset, normalising both bounds to UTC.
    pub fn new<Tz: TimeZone>(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        TimeRange {
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        }
    }

    /// True when no instant can fall inside the range.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Inclusive on both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_round_trips_through_str() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_payment_method_serde_matches_as_str() {
        for method in PaymentMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
        }
    }

    #[test]
    fn test_unknown_payment_method() {
        let err = "INVALID_TYPE".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownPaymentMethod("INVALID_TYPE".into()));
        // identifiers are case-sensitive
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_time_range_is_inclusive() {
        let start = "2022-12-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let end = "2022-12-01T01:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let range = TimeRange::new(start, end);

        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(end + chrono::Duration::seconds(1)));
        assert!(!range.contains(start - chrono::Duration::seconds(1)));
        assert!(!range.is_empty());
    }

    #[test]
    fn test_time_range_normalises_offsets() {
        let start = DateTime::parse_from_rfc3339("2022-12-01T09:00:00+09:00").unwrap();
        let end = DateTime::parse_from_rfc3339("2022-12-01T10:00:00+09:00").unwrap();
        let range = TimeRange::new(start, end);

        assert_eq!(range.start.to_rfc3339(), "2022-12-01T00:00:00+00:00");
        assert_eq!(range.end.to_rfc3339(), "2022-12-01T01:00:00+00:00");
    }

    #[test]
    fn test_inverted_time_range_is_empty() {
        let start = "2023-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let end = "2022-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let range = TimeRange::new(start, end);

        assert!(range.is_empty());
        assert!(!range.contains(start));
    }
}

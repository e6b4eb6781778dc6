//! # paypoint-core: Pure Business Logic for Paypoint
//!
//! This crate holds the payment rule engine and the hourly sales
//! aggregation as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Paypoint Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 GraphQL API (axum + async-graphql)              │   │
//! │  │         mutation payment(...)        query sales(...)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ paypoint-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   rules   │  │validation │  │  pricing  │  │   sales   │  │   │
//! │  │   │  method → │  │  items,   │  │ final and │  │  hourly   │  │   │
//! │  │   │  range,   │  │  modifier │  │  points   │  │  buckets  │  │   │
//! │  │   │  rate     │  │  range    │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  paypoint-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PaymentMethod, PaymentRequest, SaleBucket, etc.)
//! - [`rules`] - The static per-method rule table
//! - [`validation`] - Applies rules to requests
//! - [`pricing`] - Final price and points
//! - [`sales`] - Hourly aggregation
//! - [`money`] - Decimal rounding and conversion
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::DateTime;
//! use paypoint_core::{price_payment, PaymentMethod, PaymentRequest};
//! use rust_decimal_macros::dec;
//!
//! let request = PaymentRequest {
//!     customer_id: "12345".to_string(),
//!     price: dec!(100.30),
//!     price_modifier: dec!(1.01),
//!     payment_method: PaymentMethod::CashOnDelivery,
//!     datetime: DateTime::parse_from_rfc3339("2022-09-01T00:00:00Z").unwrap(),
//!     additional_item: [("courier".to_string(), "YAMATO".to_string())].into_iter().collect(),
//! };
//!
//! let priced = price_payment(request).unwrap();
//! assert_eq!(priced.final_price(), dec!(101.31));
//! assert_eq!(priced.points(), dec!(5));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod rules;
pub mod sales;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use pricing::price_payment;
pub use rules::{rule_for, PaymentMethodRule};
pub use sales::aggregate_hourly;
pub use types::*;
pub use validation::validate_payment;

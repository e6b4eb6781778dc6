//! # Error Types
//!
//! Domain-specific error types for paypoint-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  paypoint-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Rejected payment or sales input                │
//! │                                                                         │
//! │  paypoint-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What GraphQL clients see                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → GraphQL error          │
//! │        DbError ─────────────────────► ApiError (masked)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Validation messages are shown to callers verbatim, so they are exact
//! 3. Errors are enum variants, never String

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::money::format_bound;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The request was rejected by a payment or sales rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Additional items could not be turned into their stored JSON text.
    #[error("Failed to serialize additional items: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An hourly total no longer fits a 96-bit decimal.
    #[error("Sales total overflowed for the hour starting {hour}")]
    AggregateOverflow { hour: DateTime<Utc> },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The first two variants are the payment rule rejections; their messages
/// are part of the public contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Additional items do not match the schema of the payment method.
    ///
    /// ## When This Occurs
    /// - CASH with any additional item
    /// - VISA without `last4`, or `last4` that is not four digits
    /// - CASH_ON_DELIVERY with an unknown courier
    #[error("Incorrect additional items")]
    IncorrectAdditionalItems,

    /// Price modifier lies outside the method's inclusive range.
    #[error(
        "Price modifier is not in allowed range: {} to {}",
        format_bound(.min),
        format_bound(.max)
    )]
    PriceModifierOutOfRange { min: Decimal, max: Decimal },

    /// Payment method identifier is not one of the known methods.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Value must be zero or positive.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// The amount cannot be priced without losing digits: the product
    /// overflows 96 bits, or the result cannot carry two decimal places.
    #[error("{field} is too large to price exactly")]
    AmountOutOfRange { field: String },

    /// Invalid format (e.g., non-finite modifier, bad date-time).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an AmountOutOfRange error.
    pub fn out_of_range(field: impl Into<String>) -> Self {
        ValidationError::AmountOutOfRange {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # Repository Module
//!
//! Database repository implementations for Paypoint.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Service (paypoint-api)                                                │
//! │       │                                                                 │
//! │       │  db.payments().record(&priced)                                  │
//! │       │  db.sales().fetch_bucketed(&range)                              │
//! │       ▼                                                                 │
//! │  PaymentRepository              SaleRepository                         │
//! │  ├── record(&self, payment)     ├── fetch_records(&self, range)        │
//! │  ├── get_by_id(&self, id)       └── fetch_bucketed(&self, range)       │
//! │  └── count(&self)                                                      │
//! │       │                                │                                │
//! │       │  SQL Query                     │                                │
//! │       ▼                                ▼                                │
//! │  SQLite Database: payments table                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Column Encoding
//! Decimals are stored as their canonical text and timestamps as
//! fixed-width UTC text, so SQL string comparison on `datetime` is
//! chronological. The helpers below are the only place either encoding is
//! produced or parsed.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{DbError, DbResult};

pub mod payment;
pub mod sale;

/// Stored timestamp layout: `2022-12-01T00:31:00.000000000Z`.
///
/// Nanoseconds are chrono's full precision, so a stored instant compares
/// exactly like the `DateTime` it came from.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9fZ";

/// Encodes a timestamp for storage.
pub(crate) fn encode_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn decode_timestamp(column: &str, raw: &str) -> DbResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| DbError::corrupt(column, format!("{raw:?}: {e}")))
}

pub(crate) fn decode_decimal(column: &str, raw: &str) -> DbResult<Decimal> {
    Decimal::from_str(raw).map_err(|e| DbError::corrupt(column, format!("{raw:?}: {e}")))
}

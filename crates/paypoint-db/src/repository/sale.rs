//! # Sale Repository
//!
//! Read side of the payments table: hourly sales over a time range.
//!
//! ## Query Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_bucketed(range)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT datetime, final_price, points FROM payments                    │
//! │   WHERE datetime BETWEEN start AND end      ← uses idx_payments_datetime│
//! │   ORDER BY datetime                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  decode rows → Vec<SaleRecord>                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  paypoint_core::aggregate_hourly        ← exact decimal sums            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<SaleBucket>, ascending by hour                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sums are done in Rust rather than with SQL `SUM()`, which would coerce
//! the decimal text to floating point.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::{decode_decimal, decode_timestamp, encode_timestamp};
use paypoint_core::{aggregate_hourly, SaleBucket, SaleRecord, TimeRange};

#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    datetime: String,
    final_price: String,
    points: String,
}

impl SaleRow {
    fn decode(self) -> DbResult<SaleRecord> {
        Ok(SaleRecord {
            datetime: decode_timestamp("datetime", &self.datetime)?,
            final_price: decode_decimal("final_price", &self.final_price)?,
            points: decode_decimal("points", &self.points)?,
        })
    }
}

/// Repository for sales reporting.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Fetches the payments whose timestamp lies in `range` (both ends
    /// inclusive), oldest first.
    pub async fn fetch_records(&self, range: &TimeRange) -> DbResult<Vec<SaleRecord>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<SaleRow> = sqlx::query_as(
            r#"
            SELECT datetime, final_price, points
            FROM payments
            WHERE datetime >= ?1 AND datetime <= ?2
            ORDER BY datetime
            "#,
        )
        .bind(encode_timestamp(range.start))
        .bind(encode_timestamp(range.end))
        .fetch_all(&self.pool)
        .await?;

        debug!(
            start = %range.start,
            end = %range.end,
            rows = rows.len(),
            "Fetched sale records"
        );

        rows.into_iter().map(SaleRow::decode).collect()
    }

    /// Hourly totals over `range`, ascending. Hours without sales are
    /// omitted.
    ///
    /// Fails with [`DbError::Aggregation`](crate::DbError::Aggregation) when
    /// an hour's total overflows.
    pub async fn fetch_bucketed(&self, range: &TimeRange) -> DbResult<Vec<SaleBucket>> {
        let records = self.fetch_records(range).await?;
        Ok(aggregate_hourly(records, range)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

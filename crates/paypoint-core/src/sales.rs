//! # Sales Aggregation
//!
//! Groups recorded payments into hourly totals.
//!
//! ## Bucketing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  records (any order)                 buckets (ascending by hour)        │
//! │                                                                         │
//! │  00:00:00  95.00  5  ──┐                                                │
//! │  00:31:00  90.00  3  ──┴──►  2022-12-01T00:00Z   185.00   8             │
//! │  (next day) 90.00 3  ─────►  2022-12-02T00:00Z    90.00   3             │
//! │                                                                         │
//! │  Records outside [start, end] are skipped.                              │
//! │  Hours with no records produce no bucket.                               │
//! │  A total that overflows fails the whole aggregation.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, DurationRound, TimeDelta, Timelike, Utc};
use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::money::exact_add;
use crate::types::{SaleBucket, SaleRecord, TimeRange};

/// Truncates a timestamp to the top of its hour.
pub fn truncate_to_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .duration_trunc(TimeDelta::hours(1))
        .unwrap_or_else(|_| {
            // only reachable for timestamps outside chrono's nanosecond range
            instant
                .with_nanosecond(0)
                .and_then(|t| t.with_second(0))
                .and_then(|t| t.with_minute(0))
                .unwrap_or(instant)
        })
}

/// Sums records inside `range` into hourly buckets, ascending by hour.
///
/// An empty or inverted range yields no buckets.
///
/// ## Errors
/// [`CoreError::AggregateOverflow`] when an hour's sales or points no longer
/// fit a 96-bit decimal at their full scale.
pub fn aggregate_hourly<I>(records: I, range: &TimeRange) -> CoreResult<Vec<SaleBucket>>
where
    I: IntoIterator<Item = SaleRecord>,
{
    if range.is_empty() {
        return Ok(Vec::new());
    }

    let mut totals: BTreeMap<DateTime<Utc>, (Decimal, Decimal)> = BTreeMap::new();
    for record in records {
        if !range.contains(record.datetime) {
            continue;
        }
        let hour = truncate_to_hour(record.datetime);
        let entry = totals.entry(hour).or_insert((Decimal::ZERO, Decimal::ZERO));
        let overflow = || CoreError::AggregateOverflow { hour };
        entry.0 = exact_add(entry.0, record.final_price).ok_or_else(overflow)?;
        entry.1 = exact_add(entry.1, record.points).ok_or_else(overflow)?;
    }

    Ok(totals
        .into_iter()
        .map(|(hour_timestamp, (total_sales, total_points))| SaleBucket {
            hour_timestamp,
            total_sales,
            total_points,
        })
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Hourly sales reporting.

use std::sync::Arc;

use paypoint_core::{SaleBucket, TimeRange};
use tracing::debug;

use crate::error::ApiResult;
use crate::services::SalesReader;

/// Answers hourly sales queries.
#[derive(Clone)]
pub struct SaleService {
    reader: Arc<dyn SalesReader>,
}

impl SaleService {
    pub fn new(reader: Arc<dyn SalesReader>) -> Self {
        SaleService { reader }
    }

    /// Hourly buckets for `range`, ascending. An inverted range yields an
    /// empty list without touching storage.
    pub async fn hourly_sales(&self, range: TimeRange) -> ApiResult<Vec<SaleBucket>> {
        if range.is_empty() {
            debug!(start = %range.start, end = %range.end, "Inverted sales range");
            return Ok(Vec::new());
        }

        let buckets = self.reader.fetch_bucketed(&range).await?;
        debug!(
            start = %range.start,
            end = %range.end,
            buckets = buckets.len(),
            "Sales query complete"
        );

        Ok(buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use paypoint_db::DbError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingReader {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SalesReader for CountingReader {
        async fn fetch_bucketed(&self, _range: &TimeRange) -> Result<Vec<SaleBucket>, DbError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    struct BrokenReader;

    #[async_trait]
    impl SalesReader for BrokenReader {
        async fn fetch_bucketed(&self, _range: &TimeRange) -> Result<Vec<SaleBucket>, DbError> {
            Err(DbError::PoolExhausted)
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_inverted_range_skips_storage() {
        let reader = Arc::new(CountingReader::default());
        let service = SaleService::new(reader.clone());

        let buckets = service
            .hourly_sales(TimeRange::new(at("2023-01-01T00:00:00Z"), at("2022-01-01T00:00:00Z")))
            .await
            .unwrap();

        assert!(buckets.is_empty());
        assert_eq!(reader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reader_failure_is_masked() {
        let service = SaleService::new(Arc::new(BrokenReader));

        let err = service
            .hourly_sales(TimeRange::new(at("2022-01-01T00:00:00Z"), at("2023-01-01T00:00:00Z")))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Internal error");
    }
}

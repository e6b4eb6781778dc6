//! Service layer.
//!
//! Services orchestrate the pure core with the storage collaborators. The
//! collaborators sit behind two traits so tests can swap in doubles:
//!
//! ```text
//! PaymentService ── price_payment() ──► dyn PaymentRecorder ──► PaymentRepository
//! SaleService    ──────────────────────► dyn SalesReader    ──► SaleRepository
//! ```

use async_trait::async_trait;
use paypoint_core::{PricedPayment, SaleBucket, TimeRange};
use paypoint_db::{DbError, PaymentRepository, SaleRepository};

pub mod payment_service;
pub mod sale_service;

pub use payment_service::PaymentService;
pub use sale_service::SaleService;

/// Persists accepted payments.
///
/// A failure must reach the caller; implementations never drop a payment
/// silently.
#[async_trait]
pub trait PaymentRecorder: Send + Sync {
    async fn record(&self, payment: &PricedPayment) -> Result<(), DbError>;
}

/// Reads hourly sales buckets.
///
/// Implementations return buckets ascending by hour, both range bounds
/// inclusive, omitting empty hours.
#[async_trait]
pub trait SalesReader: Send + Sync {
    async fn fetch_bucketed(&self, range: &TimeRange) -> Result<Vec<SaleBucket>, DbError>;
}

#[async_trait]
impl PaymentRecorder for PaymentRepository {
    async fn record(&self, payment: &PricedPayment) -> Result<(), DbError> {
        PaymentRepository::record(self, payment).await.map(|_id| ())
    }
}

#[async_trait]
impl SalesReader for SaleRepository {
    async fn fetch_bucketed(&self, range: &TimeRange) -> Result<Vec<SaleBucket>, DbError> {
        SaleRepository::fetch_bucketed(self, range).await
    }
}

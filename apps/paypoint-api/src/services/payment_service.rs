//! Payment submission.

use std::sync::Arc;

use paypoint_core::{price_payment, CoreError, PaymentRequest, PaymentResponse};
use tracing::{info, warn};

use crate::error::ApiResult;
use crate::services::PaymentRecorder;

/// Validates, prices and records payments.
#[derive(Clone)]
pub struct PaymentService {
    recorder: Arc<dyn PaymentRecorder>,
}

impl PaymentService {
    pub fn new(recorder: Arc<dyn PaymentRecorder>) -> Self {
        PaymentService { recorder }
    }

    /// Runs a request through validation, pricing and persistence.
    ///
    /// Nothing is recorded when validation fails. A recording failure is
    /// returned as an error; the priced result is never handed back for a
    /// payment that was not stored.
    pub async fn submit(&self, request: PaymentRequest) -> ApiResult<PaymentResponse> {
        let customer_id = request.customer_id.clone();
        let method = request.payment_method;

        let priced = match price_payment(request) {
            Ok(priced) => priced,
            Err(CoreError::Validation(reason)) => {
                warn!(%customer_id, %method, %reason, "Payment rejected");
                return Err(reason.into());
            }
            Err(e) => return Err(e.into()),
        };

        self.recorder.record(&priced).await?;

        info!(
            %customer_id,
            %method,
            final_price = %priced.final_price(),
            points = %priced.points(),
            "Payment accepted"
        );

        Ok(priced.response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use chrono::DateTime;
    use paypoint_core::{PaymentMethod, PricedPayment};
    use paypoint_db::DbError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Keeps recorded payments in memory.
    #[derive(Default)]
    struct MemoryRecorder {
        recorded: Mutex<Vec<PricedPayment>>,
    }

    #[async_trait]
    impl PaymentRecorder for MemoryRecorder {
        async fn record(&self, payment: &PricedPayment) -> Result<(), DbError> {
            self.recorded.lock().unwrap().push(payment.clone());
            Ok(())
        }
    }

    struct BrokenRecorder;

    #[async_trait]
    impl PaymentRecorder for BrokenRecorder {
        async fn record(&self, _payment: &PricedPayment) -> Result<(), DbError> {
            Err(DbError::QueryFailed("disk I/O error".to_string()))
        }
    }

    fn request(method: PaymentMethod, modifier: Decimal, items: &[(&str, &str)]) -> PaymentRequest {
        PaymentRequest {
            customer_id: "9841".to_string(),
            price: dec!(200.50),
            price_modifier: modifier,
            payment_method: method,
            datetime: DateTime::parse_from_rfc3339("2022-03-01T01:00:00Z").unwrap(),
            additional_item: items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_accepted_payment_is_recorded() {
        let recorder = Arc::new(MemoryRecorder::default());
        let service = PaymentService::new(recorder.clone());

        let response = service
            .submit(request(PaymentMethod::Mastercard, dec!(0.95), &[("last4", "5678")]))
            .await
            .unwrap();

        assert_eq!(response.final_price, dec!(190.48));
        assert_eq!(response.points, dec!(6));

        let recorded = recorder.recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].customer_id(), "9841");
        assert_eq!(recorded[0].additional_item_json(), r#"{"last4":"5678"}"#);
    }

    #[tokio::test]
    async fn test_rejected_payment_is_not_recorded() {
        let recorder = Arc::new(MemoryRecorder::default());
        let service = PaymentService::new(recorder.clone());

        let err = service
            .submit(request(PaymentMethod::Cash, dec!(1.05), &[]))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            err.message,
            "Price modifier is not in allowed range: 0.9 to 1.0"
        );
        assert!(recorder.recorded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recording_failure_is_masked() {
        let service = PaymentService::new(Arc::new(BrokenRecorder));

        let err = service
            .submit(request(PaymentMethod::Cash, dec!(1), &[]))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Internal error");
    }
}

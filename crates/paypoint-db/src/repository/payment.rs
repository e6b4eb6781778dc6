//! # Payment Repository
//!
//! Persists priced payments and reads them back.
//!
//! ## Row Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricedPayment (paypoint-core)                                          │
//! │       │                                                                 │
//! │       │ record()  → new UUID v4 id, created_at = updated_at = now      │
//! │       ▼                                                                 │
//! │  payments row (all TEXT columns, one INSERT, no transaction needed)    │
//! │       │                                                                 │
//! │       │ get_by_id()                                                     │
//! │       ▼                                                                 │
//! │  StoredPayment (decoded, with id and audit timestamps)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::{decode_decimal, decode_timestamp, encode_timestamp};
use paypoint_core::{AdditionalItems, PaymentMethod, PricedPayment};

/// A payment as stored, decoded back into domain types.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPayment {
    pub id: String,
    pub customer_id: String,
    pub price: Decimal,
    pub price_modifier: Decimal,
    pub final_price: Decimal,
    pub points: Decimal,
    pub payment_method: PaymentMethod,
    /// Payment time, UTC, nanosecond precision.
    pub datetime: DateTime<Utc>,
    pub additional_item: AdditionalItems,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw row; every column is text.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: String,
    customer_id: String,
    price: String,
    price_modifier: String,
    final_price: String,
    points: String,
    payment_method: String,
    datetime: String,
    additional_item: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PaymentRow> for StoredPayment {
    type Error = DbError;

    fn try_from(row: PaymentRow) -> DbResult<Self> {
        Ok(StoredPayment {
            price: decode_decimal("price", &row.price)?,
            price_modifier: decode_decimal("price_modifier", &row.price_modifier)?,
            final_price: decode_decimal("final_price", &row.final_price)?,
            points: decode_decimal("points", &row.points)?,
            payment_method: row
                .payment_method
                .parse()
                .map_err(|e| DbError::corrupt("payment_method", e))?,
            datetime: decode_timestamp("datetime", &row.datetime)?,
            additional_item: serde_json::from_str(&row.additional_item)
                .map_err(|e| DbError::corrupt("additional_item", e))?,
            created_at: decode_timestamp("created_at", &row.created_at)?,
            updated_at: decode_timestamp("updated_at", &row.updated_at)?,
            id: row.id,
            customer_id: row.customer_id,
        })
    }
}

/// Repository for payment database operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Inserts a priced payment and returns its generated id.
    ///
    /// The timestamp is stored in UTC; the submitted offset is not kept.
    pub async fn record(&self, payment: &PricedPayment) -> DbResult<String> {
        let id = Uuid::new_v4().to_string();
        let now = encode_timestamp(Utc::now());

        debug!(
            id = %id,
            customer_id = %payment.customer_id(),
            method = %payment.payment_method(),
            final_price = %payment.final_price(),
            "Recording payment"
        );

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, customer_id,
                price, price_modifier, final_price, points,
                payment_method, datetime, additional_item,
                created_at, updated_at
            ) VALUES (
                ?1, ?2,
                ?3, ?4, ?5, ?6,
                ?7, ?8, ?9,
                ?10, ?11
            )
            "#,
        )
        .bind(&id)
        .bind(payment.customer_id())
        .bind(payment.price().to_string())
        .bind(payment.price_modifier().to_string())
        .bind(payment.final_price().to_string())
        .bind(payment.points().to_string())
        .bind(payment.payment_method().as_str())
        .bind(encode_timestamp(payment.datetime_utc()))
        .bind(payment.additional_item_json())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Gets a payment by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<StoredPayment>> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT
                id, customer_id,
                price, price_modifier, final_price, points,
                payment_method, datetime, additional_item,
                created_at, updated_at
            FROM payments
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(StoredPayment::try_from).transpose()
    }

    /// Counts stored payments.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::DateTime;
    use paypoint_core::{price_payment, PaymentRequest};
    use rust_decimal_macros::dec;

    fn cod_payment() -> PricedPayment {
        price_payment(PaymentRequest {
            customer_id: "12345".to_string(),
            price: dec!(100.30),
            price_modifier: dec!(1.01),
            payment_method: PaymentMethod::CashOnDelivery,
            datetime: DateTime::parse_from_rfc3339("2022-09-01T09:30:00+09:00").unwrap(),
            additional_item: [("courier".to_string(), "YAMATO".to_string())]
                .into_iter()
                .collect(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_record_and_read_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.payments();

        let id = repo.record(&cod_payment()).await.unwrap();
        let stored = repo.get_by_id(&id).await.unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.customer_id, "12345");
        assert_eq!(stored.price, dec!(100.30));
        assert_eq!(stored.price_modifier, dec!(1.01));
        assert_eq!(stored.final_price.to_string(), "101.31");
        assert_eq!(stored.points.to_string(), "5");
        assert_eq!(stored.payment_method, PaymentMethod::CashOnDelivery);
        // +09:00 offset normalised to UTC
        assert_eq!(stored.datetime.to_rfc3339(), "2022-09-01T00:30:00+00:00");
        assert_eq!(stored.additional_item.get("courier").unwrap(), "YAMATO");
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[tokio::test]
    async fn test_additional_item_stored_as_json_text() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let id = db.payments().record(&cod_payment()).await.unwrap();

        let raw: String = sqlx::query_scalar("SELECT additional_item FROM payments WHERE id = ?1")
            .bind(&id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(raw, r#"{"courier":"YAMATO"}"#);
    }

    #[tokio::test]
    async fn test_count_and_missing_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.payments();
        assert_eq!(repo.count().await.unwrap(), 0);

        let first = repo.record(&cod_payment()).await.unwrap();
        let second = repo.record(&cod_payment()).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(repo.count().await.unwrap(), 2);

        assert!(repo.get_by_id("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_fails_on_closed_pool() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let err = db.payments().record(&cod_payment()).await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }
}

//! # Storage Errors
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sqlx::Error / MigrateError / undecodable text / total overflow         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError  (categorised, full detail kept for the logs)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  paypoint-api masks it: clients only ever see "Internal error"          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use paypoint_core::CoreError;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Failure while talking to the payments database.
#[derive(Debug, Error)]
pub enum DbError {
    /// A lookup that must return a row returned none.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A row collided with an existing primary key or unique index.
    #[error("Duplicate value for {constraint}")]
    UniqueViolation { constraint: String },

    /// The pool could not be opened, or has been closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// An embedded migration could not be applied.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement (missing table, locked database, ...).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Stored text that no longer decodes: a decimal, timestamp, method
    /// identifier or additional item document.
    #[error("Corrupt value in column {column}: {reason}")]
    CorruptValue { column: String, reason: String },

    /// Stored rows decoded but could not be summed.
    #[error("Aggregation failed: {0}")]
    Aggregation(#[from] CoreError),

    /// Every pooled connection stayed busy past the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn corrupt(column: impl Into<String>, reason: impl ToString) -> Self {
        DbError::CorruptValue {
            column: column.into(),
            reason: reason.to_string(),
        }
    }
}

/// ```text
/// RowNotFound                     → NotFound
/// Database(kind = UniqueViolation) → UniqueViolation
/// Database(other)                 → QueryFailed
/// PoolTimedOut                    → PoolExhausted
/// PoolClosed                      → ConnectionFailed
/// anything else                   → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Row", "unknown"),
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => DbError::UniqueViolation {
                    // SQLite: "UNIQUE constraint failed: payments.id"
                    constraint: db_err
                        .message()
                        .rsplit(": ")
                        .next()
                        .unwrap_or("unknown")
                        .to_string(),
                },
                _ => DbError::QueryFailed(db_err.message().to_string()),
            },
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[test]
    fn test_pool_errors() {
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_id_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let insert = r#"
            INSERT INTO payments (
                id, customer_id, price, price_modifier, final_price, points,
                payment_method, datetime, additional_item, created_at, updated_at
            ) VALUES ('dup', 'c', '1', '1', '1.00', '0', 'CASH',
                      '2022-01-01T00:00:00.000000000Z', '{}',
                      '2022-01-01T00:00:00.000000000Z', '2022-01-01T00:00:00.000000000Z')
        "#;

        sqlx::query(insert).execute(db.pool()).await.unwrap();
        let err: DbError = sqlx::query(insert)
            .execute(db.pool())
            .await
            .unwrap_err()
            .into();

        match err {
            DbError::UniqueViolation { constraint } => assert_eq!(constraint, "payments.id"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_table_is_query_failure() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();
        let err: DbError = sqlx::query("SELECT * FROM payments")
            .fetch_all(db.pool())
            .await
            .err()
            .unwrap()
            .into();

        assert!(matches!(err, DbError::QueryFailed(_)));
    }

    #[test]
    fn test_aggregation_error_keeps_detail() {
        let hour = "2022-12-01T00:00:00Z".parse().unwrap();
        let err = DbError::from(CoreError::AggregateOverflow { hour });
        assert!(matches!(err, DbError::Aggregation(_)));
        assert_eq!(
            err.to_string(),
            "Aggregation failed: Sales total overflowed for the hour starting 2022-12-01 00:00:00 UTC"
        );
    }

    #[test]
    fn test_corrupt_value_message() {
        let err = DbError::corrupt("final_price", "invalid decimal");
        assert_eq!(
            err.to_string(),
            "Corrupt value in column final_price: invalid decimal"
        );
    }
}

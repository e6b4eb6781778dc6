//! # API Error Type
//!
//! Unified error type for GraphQL resolvers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Paypoint                               │
//! │                                                                         │
//! │  Resolver (payment / sales)                                            │
//! │       │  Result<T, ApiError>                                            │
//! │       │                                                                 │
//! │       ├── ValidationError ──► ApiError { VALIDATION_ERROR, message }   │
//! │       │                       → message shown verbatim                  │
//! │       │                       → classification "InvalidSyntax"          │
//! │       │                                                                 │
//! │       ├── DbError ──────────► tracing::error!(detail)                   │
//! │       │                       ApiError { DATABASE_ERROR, masked }      │
//! │       │                       → "Internal error"                        │
//! │       │                       → classification "INTERNAL_ERROR"         │
//! │       │                                                                 │
//! │       └── Success                                                       │
//! │                                                                         │
//! │  GraphQL response:                                                      │
//! │  { "errors": [{ "message": "Incorrect additional items",               │
//! │                 "path": ["payment"],                                    │
//! │                 "extensions": { "classification": "InvalidSyntax" } }],│
//! │    "data": null }                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_graphql::ErrorExtensions;
use paypoint_core::{CoreError, ValidationError};
use paypoint_db::DbError;
use serde::Serialize;

/// Message shown to clients in place of any internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

/// API error returned from services and resolvers.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Message the client sees
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input rejected by a payment rule or input check
    ValidationError,

    /// Persistence failed
    DatabaseError,

    /// Anything else unexpected
    Internal,
}

impl ErrorCode {
    /// Value of the `classification` extension on GraphQL errors.
    pub fn classification(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "InvalidSyntax",
            ErrorCode::DatabaseError | ErrorCode::Internal => "INTERNAL_ERROR",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a masked internal error.
    pub fn internal() -> Self {
        ApiError::new(ErrorCode::Internal, INTERNAL_ERROR_MESSAGE)
    }
}

/// Converts database errors to API errors.
///
/// Every variant is logged with its detail and masked.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        tracing::error!(error = %err, "Database operation failed");
        ApiError::new(ErrorCode::DatabaseError, INTERNAL_ERROR_MESSAGE)
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::Serialization(e) => {
                tracing::error!(error = %e, "Failed to serialize additional items");
                ApiError::internal()
            }
            CoreError::AggregateOverflow { hour } => {
                tracing::error!(%hour, "Hourly sales total overflowed");
                ApiError::internal()
            }
        }
    }
}

/// Attaches the `classification` extension.
impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.message.clone())
            .extend_with(|_, ext| ext.set("classification", self.code.classification()))
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

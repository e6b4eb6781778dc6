//! # paypoint-api: GraphQL Server for Paypoint
//!
//! Exposes payment submission and hourly sales reporting over GraphQL.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP (axum) ──► routes ──► schema (async-graphql)                      │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                              services ──► paypoint-core (rules, pricing)│
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                         PaymentRecorder / SalesReader                   │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                           paypoint-db (SQLite)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod schema;
pub mod services;

use std::sync::Arc;

use paypoint_db::Database;

pub use config::{ApiConfig, ConfigError, LogFormat, UnknownLogFormat};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::build_router;
pub use schema::{build_schema, PaypointSchema};
pub use services::{PaymentRecorder, PaymentService, SaleService, SalesReader};

/// Schema wired to the SQLite repositories of `db`.
pub fn schema_for(db: &Database) -> PaypointSchema {
    build_schema(
        PaymentService::new(Arc::new(db.payments())),
        SaleService::new(Arc::new(db.sales())),
    )
}

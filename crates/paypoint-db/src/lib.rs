//! # paypoint-db: Database Layer for Paypoint
//!
//! This crate provides database access for the Paypoint service.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Paypoint Data Flow                               │
//! │                                                                         │
//! │  GraphQL service (payment mutation / sales query)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   paypoint-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ PaymentRepo   │    │ 001_create_  │  │   │
//! │  │   │ SqlitePool    │◄───│ SaleRepo      │    │   payments   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  │                        ./paypoint.db                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Payment and sale repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paypoint_db::{Database, DbConfig};
//! use paypoint_core::TimeRange;
//!
//! let db = Database::new(DbConfig::new("./paypoint.db")).await?;
//!
//! db.payments().record(&priced).await?;
//! let buckets = db.sales().fetch_bucketed(&TimeRange::new(start, end)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::payment::{PaymentRepository, StoredPayment};
pub use repository::sale::SaleRepository;

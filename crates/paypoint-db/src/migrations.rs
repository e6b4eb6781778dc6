//! # Schema Migrations
//!
//! The SQL under `migrations/sqlite/` is compiled into the binary, so the
//! API server and the seed tool always carry the schema they were built
//! against.
//!
//! ```text
//! open pool ──► _sqlx_migrations present? ──► apply pending files in order
//!                                               001_create_payments.sql
//! ```
//!
//! Applied files are checksummed by sqlx; editing one after release makes
//! every later startup fail with [`DbError::MigrationFailed`]. Add a new
//! numbered file instead.
//!
//! [`DbError::MigrationFailed`]: crate::DbError::MigrationFailed

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every pending migration. A no-op on an up-to-date database.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    let (total, applied) = migration_status(pool).await?;
    if total == applied {
        debug!(total, "Schema up to date");
        return Ok(());
    }

    info!(pending = total - applied, "Applying payments schema migrations");
    MIGRATOR.run(pool).await?;
    info!(total, "Schema migrated");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)`.
///
/// A database that was never migrated has no bookkeeping table and reports
/// zero applied.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    if tables == 0 {
        return Ok((total, 0));
    }

    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok((total, applied as usize))
}

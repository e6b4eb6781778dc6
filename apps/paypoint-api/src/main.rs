//! # Paypoint API Server
//!
//! GraphQL server for payment submission and hourly sales.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ApiConfig::load()  ──► init_tracing()                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new()    ──► migrations applied                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  schema + router    ──► axum::serve on PAYPOINT_HTTP_PORT               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ctrl+C / SIGTERM   ──► graceful shutdown, pool closed                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use paypoint_api::{build_router, schema_for, ApiConfig, LogFormat};
use paypoint_db::{Database, DbConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_LOG_FILTER: &str = "paypoint_api=info,paypoint_db=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load()?;
    init_tracing(config.log_format);

    info!("Starting Paypoint API server...");
    info!(
        addr = %config.socket_addr(),
        database = %config.database_path.display(),
        playground = config.graphql_playground,
        "Configuration loaded"
    );

    let db = Database::new(
        DbConfig::new(config.database_path.clone()).max_connections(config.db_max_connections),
    )
    .await
    .with_context(|| format!("opening {}", config.database_path.display()))?;
    info!("Database ready");

    let schema = schema_for(&db);
    let app = build_router(schema, db.clone(), config.graphql_playground);

    let listener = TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("binding {}", config.socket_addr()))?;
    info!(addr = %config.socket_addr(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

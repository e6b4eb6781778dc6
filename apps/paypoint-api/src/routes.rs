//! HTTP routing.
//!
//! | Method | Path       | Handler                                  |
//! |--------|------------|------------------------------------------|
//! | POST   | `/graphql` | queries and mutations                    |
//! | GET    | `/graphql` | playground (when enabled)                |
//! | GET    | `/health`  | 200 when the database answers, else 503  |

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::GraphQL;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post_service};
use axum::Router;
use paypoint_db::Database;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::schema::PaypointSchema;

/// Builds the application router.
pub fn build_router(schema: PaypointSchema, db: Database, playground: bool) -> Router {
    let graphql = if playground {
        get(graphql_playground).post_service(GraphQL::new(schema))
    } else {
        post_service(GraphQL::new(schema))
    };

    Router::new()
        .route("/graphql", graphql)
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

async fn health(State(db): State<Database>) -> StatusCode {
    if db.health_check().await {
        StatusCode::OK
    } else {
        warn!("Health check failed: database unreachable");
        StatusCode::SERVICE_UNAVAILABLE
    }
}

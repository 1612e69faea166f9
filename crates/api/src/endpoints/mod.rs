//! API endpoints.

mod assignments;
mod auth;
mod classes;
mod complaints;
mod export;
mod monitoring;
mod public;
mod ratings;
mod reports;
mod system;
mod upload;

use axum::{routing::get, Json, Router};

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth::router())
        .nest("/reports", reports::router())
        .nest("/complaints", complaints::router())
        .nest("/ratings", ratings::router())
        .nest("/assignments", assignments::router())
        .nest("/classes", classes::router())
        .nest("/monitoring", monitoring::router())
        .nest("/export", export::router())
        .nest("/system", system::router())
        .nest("/public", public::router())
        .nest("/upload", upload::router())
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

//! Monitoring endpoints.

use axum::{extract::State, routing::get, Json, Router};
use reporter_common::AppResult;
use reporter_core::MonitoringRow;

use crate::{extractors::AuthUser, middleware::AppState};

/// Reports in the caller's monitoring scope with rating aggregates.
async fn overview(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MonitoringRow>>> {
    let rows = state.monitoring_service.overview(&user).await?;
    Ok(Json(rows))
}

/// Monitoring routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(overview))
}

//! Public, unauthenticated endpoints for the landing page.

use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use reporter_common::AppResult;
use reporter_core::{FacultyHierarchy, FacultyOverview, PublicReport, PublicStats, StaffCount};

use crate::middleware::AppState;

/// Headline counts.
async fn stats(State(state): State<AppState>) -> AppResult<Json<PublicStats>> {
    Ok(Json(state.stats_service.overview().await?))
}

/// Faculties with headcounts.
async fn faculties(State(state): State<AppState>) -> AppResult<Json<Vec<FacultyOverview>>> {
    Ok(Json(state.stats_service.faculties().await?))
}

/// Staff grouped per faculty into role buckets.
async fn staff_hierarchy(
    State(state): State<AppState>,
) -> AppResult<Json<BTreeMap<i32, FacultyHierarchy>>> {
    Ok(Json(state.stats_service.staff_hierarchy().await?))
}

/// Per-faculty staff totals with a per-role breakdown.
async fn staff_count(State(state): State<AppState>) -> AppResult<Json<BTreeMap<i32, StaffCount>>> {
    Ok(Json(state.stats_service.staff_count().await?))
}

/// Latest signed reports.
async fn reports(State(state): State<AppState>) -> AppResult<Json<Vec<PublicReport>>> {
    Ok(Json(state.stats_service.recent_reports().await?))
}

/// Public routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/faculties", get(faculties))
        .route("/staff-hierarchy", get(staff_hierarchy))
        .route("/staff-count", get(staff_count))
        .route("/reports", get(reports))
}

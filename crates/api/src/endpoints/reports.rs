//! Lecture report endpoints.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use reporter_common::AppResult;
use reporter_core::{CreateReportInput, ReportView, SignReportInput};
use reporter_db::entities::report;

use crate::{extractors::AuthUser, middleware::AppState, response::Created};

/// File a new lecture report.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReportInput>,
) -> AppResult<Created<report::Model>> {
    let report = state.report_service.create(&user, input).await?;
    Ok(Created(report))
}

/// Reports visible to the caller.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReportView>>> {
    let reports = state.report_service.list(&user).await?;
    Ok(Json(reports))
}

/// Countersign a pending report.
async fn sign(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SignReportInput>,
) -> AppResult<Json<report::Model>> {
    let report = state.report_service.sign(&user, input).await?;
    Ok(Json(report))
}

/// Report routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/sign", post(sign))
}

//! Complaint endpoints.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use reporter_common::AppResult;
use reporter_core::{ComplaintView, CreateComplaintInput, RespondInput};
use reporter_db::entities::complaint;

use crate::{extractors::AuthUser, middleware::AppState, response::Created};

/// File a complaint.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateComplaintInput>,
) -> AppResult<Created<complaint::Model>> {
    let complaint = state.complaint_service.create(&user, input).await?;
    Ok(Created(complaint))
}

/// Complaints visible to the caller.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ComplaintView>>> {
    let complaints = state.complaint_service.list(&user).await?;
    Ok(Json(complaints))
}

/// Respond to a pending complaint.
async fn respond(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RespondInput>,
) -> AppResult<Json<complaint::Model>> {
    let complaint = state.complaint_service.respond(&user, input).await?;
    Ok(Json(complaint))
}

/// Pending complaints the caller can answer.
async fn for_response(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ComplaintView>>> {
    let complaints = state.complaint_service.list_for_response(&user).await?;
    Ok(Json(complaints))
}

/// Complaint routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/respond", post(respond))
        .route("/for-response", get(for_response))
}

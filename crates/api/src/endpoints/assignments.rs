//! Course assignment endpoints.

use axum::{extract::State, routing::get, Json, Router};
use reporter_common::AppResult;
use reporter_core::{AssignmentView, CreateAssignmentInput};
use reporter_db::entities::assignment;

use crate::{extractors::AuthUser, middleware::AppState, response::Created};

/// Assign a course to a lecturer.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAssignmentInput>,
) -> AppResult<Created<assignment::Model>> {
    let assignment = state.assignment_service.create(&user, input).await?;
    Ok(Created(assignment))
}

/// Assignments within the caller's faculty.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AssignmentView>>> {
    let assignments = state.assignment_service.list(&user).await?;
    Ok(Json(assignments))
}

/// Assignment routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list).post(create))
}

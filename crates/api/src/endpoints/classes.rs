//! Class endpoints.

use axum::{extract::State, routing::get, Json, Router};
use reporter_common::AppResult;
use reporter_core::{ClassView, CreateClassInput};
use reporter_db::entities::class;

use crate::{extractors::AuthUser, middleware::AppState, response::Created};

/// Classes whose course belongs to the caller's faculty.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ClassView>>> {
    let classes = state.directory_service.classes_in_faculty(&user).await?;
    Ok(Json(classes))
}

/// Create a class.
async fn create(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateClassInput>,
) -> AppResult<Created<class::Model>> {
    let class = state.directory_service.create_class(input).await?;
    Ok(Created(class))
}

/// Class routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list).post(create))
}

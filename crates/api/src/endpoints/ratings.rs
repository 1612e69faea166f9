//! Rating endpoints.

use axum::{extract::State, routing::get, Json, Router};
use reporter_common::AppResult;
use reporter_core::{CreateRatingInput, RatingTarget, RatingView};
use reporter_db::entities::rating;

use crate::{extractors::AuthUser, middleware::AppState, response::Created};

/// Submit a rating.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRatingInput>,
) -> AppResult<Created<rating::Model>> {
    let rating = state.rating_service.create(&user, input).await?;
    Ok(Created(rating))
}

/// Ratings visible to the caller.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RatingView>>> {
    let ratings = state.rating_service.list(&user).await?;
    Ok(Json(ratings))
}

/// Staff the caller may rate.
async fn lecturers(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RatingTarget>>> {
    let targets = state.rating_service.rating_targets(&user).await?;
    Ok(Json(targets))
}

/// Rating routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/lecturers", get(lecturers))
}

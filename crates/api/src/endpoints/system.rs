//! System and directory endpoints.
//!
//! Reference lists are public so registration forms can populate their
//! choice lists before a token exists. Everything user-scoped requires
//! auth.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use reporter_common::{AppError, AppResult};
use reporter_core::{ProfileView, UpdateProfileInput, UserView};
use reporter_db::entities::{class, course, faculty, Role};

use crate::{extractors::AuthUser, middleware::AppState};

/// All faculties.
async fn faculties(State(state): State<AppState>) -> AppResult<Json<Vec<faculty::Model>>> {
    Ok(Json(state.directory_service.faculties().await?))
}

/// All courses.
async fn courses(State(state): State<AppState>) -> AppResult<Json<Vec<course::Model>>> {
    Ok(Json(state.directory_service.courses().await?))
}

/// All classes.
async fn classes(State(state): State<AppState>) -> AppResult<Json<Vec<class::Model>>> {
    Ok(Json(state.directory_service.classes().await?))
}

/// A single class.
async fn class(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<class::Model>> {
    Ok(Json(state.directory_service.class(id).await?))
}

/// Users of a role within the caller's faculty.
async fn users_by_role(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> AppResult<Json<Vec<UserView>>> {
    let role = Role::parse(&role)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role: {role}")))?;
    Ok(Json(state.user_service.users_by_role(&user, role).await?))
}

/// The caller's profile with faculty and class names.
async fn profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ProfileView>> {
    Ok(Json(state.user_service.profile(&user).await?))
}

/// Update the caller's own name or email.
async fn update_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<Json<UserView>> {
    Ok(Json(state.user_service.update_profile(&user, input).await?))
}

/// System routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/faculties", get(faculties))
        .route("/courses", get(courses))
        .route("/classes", get(classes))
        .route("/classes/{id}", get(class))
        .route("/users/{role}", get(users_by_role))
        .route("/user/profile", get(profile).put(update_profile))
}

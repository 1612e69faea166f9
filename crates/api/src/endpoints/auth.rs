//! Authentication endpoints.

use axum::{extract::State, routing::post, Json, Router};
use reporter_common::AppResult;
use reporter_core::{AuthResponse, LoginInput, RegisterInput};

use crate::{middleware::AppState, response::Created};

/// Register a new user account.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<Created<AuthResponse>> {
    let response = state.auth_service.register(input).await?;
    Ok(Created(response))
}

/// Sign in to an existing account.
async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<AuthResponse>> {
    let response = state.auth_service.login(input).await?;
    Ok(Json(response))
}

/// Authentication routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

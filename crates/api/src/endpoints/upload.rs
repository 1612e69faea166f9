//! Profile image upload endpoints.

use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use reporter_common::{AppError, AppResult};
use reporter_core::UserView;
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState};

/// Upload size cap in bytes.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Upload response.
#[derive(Serialize)]
pub struct UploadResponse {
    pub profile_image: String,
    pub user: UserView,
}

/// Stored profile image path.
#[derive(Serialize)]
pub struct ProfileImageResponse {
    pub profile_image: Option<String>,
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

/// Upload a profile image via multipart form.
async fn upload_profile_image(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("image") {
            let ct = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some(data.to_vec());
            content_type = Some(ct);
        }
    }

    let data = file_data.ok_or_else(|| AppError::BadRequest("No image provided".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("No image provided".to_string()))?;

    if !content_type.starts_with("image/") {
        return Err(AppError::BadRequest(
            "Only image files are allowed".to_string(),
        ));
    }

    if data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest(
            "Image exceeds the 5 MB size limit".to_string(),
        ));
    }

    // One image per user; re-uploading replaces the previous file
    let key = format!("user-{}.{}", user.id, extension_for(&content_type));
    let stored = state.storage.store(&key, &data, &content_type).await?;

    let updated = state
        .user_service
        .set_profile_image(user.id, &stored.url)
        .await?;

    Ok(Json(UploadResponse {
        profile_image: stored.url,
        user: updated,
    }))
}

/// The caller's stored profile image path.
async fn my_profile_image(AuthUser(user): AuthUser) -> Json<ProfileImageResponse> {
    Json(ProfileImageResponse {
        profile_image: user.profile_image,
    })
}

/// Upload routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile-image", post(upload_profile_image))
        .route("/my-profile-image", get(my_profile_image))
}

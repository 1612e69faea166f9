//! Data export endpoints.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    routing::get,
    Router,
};
use reporter_common::{AppError, AppResult};
use reporter_core::ExportQuery;

use crate::{extractors::AuthUser, middleware::AppState};

/// Download the caller's own data as a CSV file.
async fn user_data(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<(HeaderMap, String)> {
    let doc = state.export_service.user_data(&user, query).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", doc.filename))
            .map_err(|e| AppError::Internal(format!("Invalid filename: {e}")))?,
    );

    Ok((headers, doc.content))
}

/// Export routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/user-data", get(user_data))
}

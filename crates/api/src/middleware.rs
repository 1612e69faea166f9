//! API middleware.

use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use reporter_common::StorageBackend;
use reporter_core::{
    AssignmentService, AuthService, ComplaintService, DirectoryService, ExportService,
    MonitoringService, RatingService, ReportService, StatsService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub report_service: ReportService,
    pub complaint_service: ComplaintService,
    pub rating_service: RatingService,
    pub assignment_service: AssignmentService,
    pub directory_service: DirectoryService,
    pub monitoring_service: MonitoringService,
    pub export_service: ExportService,
    pub stats_service: StatsService,
    pub storage: Arc<dyn StorageBackend>,
}

/// Authentication middleware.
///
/// Verifies a bearer token when one is present and stashes the user in the
/// request extensions. Handlers that require auth reject through the
/// `AuthUser` extractor, so public routes pass through untouched.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.auth_service.authenticate(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}

//! Faculty reporter server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use reporter_api::{AppState, auth_middleware, router as api_router};
use reporter_common::Config;
use reporter_common::storage::LocalStorage;
use reporter_core::{
    AssignmentService, AuthService, ComplaintService, DirectoryService, ExportService,
    MonitoringService, RatingService, ReportService, StatsService, UserService,
};
use reporter_db::repositories::{
    AssignmentRepository, ClassRepository, ComplaintRepository, CourseRepository,
    FacultyRepository, RatingRepository, ReportRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reporter=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting reporter server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = reporter_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    reporter_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let faculty_repo = FacultyRepository::new(Arc::clone(&db));
    let course_repo = CourseRepository::new(Arc::clone(&db));
    let class_repo = ClassRepository::new(Arc::clone(&db));
    let report_repo = ReportRepository::new(Arc::clone(&db));
    let rating_repo = RatingRepository::new(Arc::clone(&db));
    let complaint_repo = ComplaintRepository::new(Arc::clone(&db));
    let assignment_repo = AssignmentRepository::new(Arc::clone(&db));

    // Initialize services
    let auth_service = AuthService::new(
        user_repo.clone(),
        faculty_repo.clone(),
        class_repo.clone(),
        &config,
    );
    let user_service = UserService::new(
        user_repo.clone(),
        faculty_repo.clone(),
        class_repo.clone(),
    );
    let report_service = ReportService::new(
        report_repo.clone(),
        class_repo.clone(),
        course_repo.clone(),
        faculty_repo.clone(),
        user_repo.clone(),
    );
    let complaint_service = ComplaintService::new(
        complaint_repo.clone(),
        user_repo.clone(),
        report_repo.clone(),
        class_repo.clone(),
    );
    let rating_service = RatingService::new(
        rating_repo.clone(),
        report_repo.clone(),
        user_repo.clone(),
    );
    let assignment_service = AssignmentService::new(
        assignment_repo,
        course_repo.clone(),
        class_repo.clone(),
        user_repo.clone(),
    );
    let directory_service = DirectoryService::new(
        faculty_repo.clone(),
        course_repo.clone(),
        class_repo.clone(),
    );
    let monitoring_service = MonitoringService::new(
        report_repo.clone(),
        rating_repo.clone(),
        user_repo.clone(),
        class_repo.clone(),
    );
    let export_service = ExportService::new(
        report_repo.clone(),
        complaint_repo,
        rating_repo,
        class_repo.clone(),
        course_repo.clone(),
        user_repo.clone(),
    );
    let stats_service = StatsService::new(
        faculty_repo,
        course_repo,
        class_repo,
        report_repo,
        user_repo,
    );

    // Initialize profile image storage
    let storage = Arc::new(LocalStorage::new(
        config.storage.base_path.clone().into(),
        config.storage.base_url.clone(),
    ));
    tokio::fs::create_dir_all(&config.storage.base_path).await?;

    // Create app state
    let state = AppState {
        auth_service,
        user_service,
        report_service,
        complaint_service,
        rating_service,
        assignment_service,
        directory_service,
        monitoring_service,
        export_service,
        stats_service,
        storage,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .nest_service(
            &config.storage.base_url,
            ServeDir::new(&config.storage.base_path),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

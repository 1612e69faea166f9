//! Database layer for the faculty reporter.

pub mod entities;
pub mod migrations;
pub mod repositories;

use reporter_common::{AppError, Config};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::log::LevelFilter;

/// Initialize database connection.
pub async fn init(config: &Config) -> Result<DatabaseConnection, AppError> {
    let mut opt = ConnectOptions::new(&config.database.url);

    opt.max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Run pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), AppError> {
    use sea_orm_migration::MigratorTrait;
    migrations::Migrator::up(db, None)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Translate a failed write into the user-facing error taxonomy.
///
/// Unique violations become [`AppError::Conflict`] with the caller's
/// message, foreign-key violations become a 400 pointing at the bad
/// reference, and everything else stays an opaque database error.
#[must_use]
pub fn translate_write_err(err: &DbErr, conflict_message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(conflict_message.to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            AppError::BadRequest("Invalid reference to a related record".to_string())
        }
        _ => AppError::Database(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_constraint_errors_stay_database_errors() {
        let err = DbErr::RecordNotInserted;
        match translate_write_err(&err, "duplicate") {
            AppError::Database(_) => {}
            other => panic!("expected Database error, got {other:?}"),
        }
    }
}

//! Faculty repository.

use std::sync::Arc;

use crate::entities::{faculty, Faculty};
use reporter_common::{AppError, AppResult};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

/// Faculty repository for database operations.
#[derive(Clone)]
pub struct FacultyRepository {
    db: Arc<DatabaseConnection>,
}

impl FacultyRepository {
    /// Create a new faculty repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a faculty by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<faculty::Model>> {
        Faculty::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All faculties, ordered by name.
    pub async fn find_all(&self) -> AppResult<Vec<faculty::Model>> {
        Faculty::find()
            .order_by_asc(faculty::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count faculties.
    pub async fn count(&self) -> AppResult<u64> {
        Faculty::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_find_all_ordered() {
        let faculties = vec![
            faculty::Model {
                id: 1,
                name: "Faculty of ICT".to_string(),
            },
            faculty::Model {
                id: 2,
                name: "Faculty of Tourism".to_string(),
            },
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([faculties])
                .into_connection(),
        );

        let repo = FacultyRepository::new(db);
        let result = repo.find_all().await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Faculty of ICT");
    }
}

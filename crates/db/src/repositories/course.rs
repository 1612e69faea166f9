//! Course repository.

use std::sync::Arc;

use crate::entities::{course, Course};
use reporter_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Course repository for database operations.
#[derive(Clone)]
pub struct CourseRepository {
    db: Arc<DatabaseConnection>,
}

impl CourseRepository {
    /// Create a new course repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a course by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<course::Model>> {
        Course::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a course by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<course::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course {id}")))
    }

    /// Find courses by IDs.
    pub async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<course::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Course::find()
            .filter(course::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All courses, ordered by code.
    pub async fn find_all(&self) -> AppResult<Vec<course::Model>> {
        Course::find()
            .order_by_asc(course::Column::Code)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Courses belonging to a faculty.
    pub async fn find_by_faculty(&self, faculty_id: i32) -> AppResult<Vec<course::Model>> {
        Course::find()
            .filter(course::Column::FacultyId.eq(faculty_id))
            .order_by_asc(course::Column::Code)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count courses.
    pub async fn count(&self) -> AppResult<u64> {
        Course::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Per-faculty course counts.
    pub async fn count_by_faculty(&self) -> AppResult<Vec<(i32, i64)>> {
        Course::find()
            .select_only()
            .column(course::Column::FacultyId)
            .column_as(course::Column::Id.count(), "count")
            .group_by(course::Column::FacultyId)
            .into_tuple::<(i32, i64)>()
            .all(self.db.as_ref())
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

    fn test_course(id: i32, code: &str, faculty_id: i32) -> course::Model {
        course::Model {
            id,
            name: "Web Application Development".to_string(),
            code: code.to_string(),
            faculty_id,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<course::Model>::new()])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        match repo.get_by_id(99).await {
            Err(AppError::NotFound(msg)) => assert!(msg.contains("99")),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_find_by_faculty() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_course(1, "DIWA2110", 3)]])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        let result = repo.find_by_faculty(3).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].code, "DIWA2110");
    }
}

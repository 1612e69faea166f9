//! Assignment repository.

use std::sync::Arc;

use crate::entities::{assignment, course, Assignment};
use reporter_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

/// Assignment repository for database operations.
#[derive(Clone)]
pub struct AssignmentRepository {
    db: Arc<DatabaseConnection>,
}

impl AssignmentRepository {
    /// Create a new assignment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new assignment.
    pub async fn create(&self, model: assignment::ActiveModel) -> AppResult<assignment::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| crate::translate_write_err(&e, "Assignment already exists"))
    }

    /// Assignments for courses in a faculty, newest first.
    pub async fn find_in_faculty(&self, faculty_id: i32) -> AppResult<Vec<assignment::Model>> {
        Assignment::find()
            .join(JoinType::InnerJoin, assignment::Relation::Course.def())
            .filter(course::Column::FacultyId.eq(faculty_id))
            .order_by_desc(assignment::Column::AssignedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_assignment() {
        let model = assignment::Model {
            id: 1,
            lecturer_id: 5,
            course_id: 2,
            class_id: 3,
            assigned_by: 9,
            assigned_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[model.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = AssignmentRepository::new(db);
        let active = assignment::ActiveModel {
            lecturer_id: Set(5),
            course_id: Set(2),
            class_id: Set(3),
            assigned_by: Set(9),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.lecturer_id, 5);
        assert_eq!(result.assigned_by, 9);
    }
}

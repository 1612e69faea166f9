//! Class repository.

use std::sync::Arc;

use crate::entities::{class, course, Class};
use reporter_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

/// Class repository for database operations.
#[derive(Clone)]
pub struct ClassRepository {
    db: Arc<DatabaseConnection>,
}

impl ClassRepository {
    /// Create a new class repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a class by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<class::Model>> {
        Class::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a class by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<class::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Class {id}")))
    }

    /// Find classes by IDs.
    pub async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<class::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Class::find()
            .filter(class::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All classes, ordered by name.
    pub async fn find_all(&self) -> AppResult<Vec<class::Model>> {
        Class::find()
            .order_by_asc(class::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Classes whose course belongs to a faculty.
    pub async fn find_by_faculty(&self, faculty_id: i32) -> AppResult<Vec<class::Model>> {
        Class::find()
            .join(JoinType::InnerJoin, class::Relation::Course.def())
            .filter(course::Column::FacultyId.eq(faculty_id))
            .order_by_asc(class::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new class.
    pub async fn create(&self, model: class::ActiveModel) -> AppResult<class::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| crate::translate_write_err(&e, "Class already exists"))
    }

    /// Count classes.
    pub async fn count(&self) -> AppResult<u64> {
        Class::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Per-faculty class counts (classes grouped through their course).
    pub async fn count_by_faculty(&self) -> AppResult<Vec<(i32, i64)>> {
        Class::find()
            .select_only()
            .column(course::Column::FacultyId)
            .column_as(class::Column::Id.count(), "count")
            .join(JoinType::InnerJoin, class::Relation::Course.def())
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
    use sea_orm::{DatabaseBackend, DbBackend, MockDatabase, QueryTrait};
    use std::sync::Arc;

    fn test_class(id: i32, name: &str, total: i32) -> class::Model {
        class::Model {
            id,
            name: name.to_string(),
            course_id: 1,
            total_students: total,
        }
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_class(7, "BIT-2A", 45)]])
                .into_connection(),
        );

        let repo = ClassRepository::new(db);
        let result = repo.find_by_id(7).await.unwrap().unwrap();

        assert_eq!(result.total_students, 45);
    }

    #[test]
    fn faculty_scope_joins_through_course() {
        let sql = Class::find()
            .join(JoinType::InnerJoin, class::Relation::Course.def())
            .filter(course::Column::FacultyId.eq(3))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("INNER JOIN \"courses\""));
        assert!(sql.contains("\"courses\".\"faculty_id\" = 3"));
    }
}

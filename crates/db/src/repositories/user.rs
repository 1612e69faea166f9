//! User repository.

use std::sync::Arc;

use crate::entities::{user, Role, User};
use crate::translate_write_err;
use reporter_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// One row of the grouped staff tally, decoded by column name.
#[derive(Debug, Clone, FromQueryResult)]
pub struct StaffRoleCount {
    pub faculty_id: i32,
    pub role: Role,
    pub count: i64,
}

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// Find users by IDs.
    pub async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<user::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        User::find()
            .filter(user::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    ///
    /// A duplicate email is reported as a conflict by the unique index,
    /// not by a pre-check.
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| translate_write_err(&e, "User already exists with this email"))
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| translate_write_err(&e, "User already exists with this email"))
    }

    /// Update the stored profile image path.
    pub async fn set_profile_image(&self, user_id: i32, path: &str) -> AppResult<user::Model> {
        let user = self.get_by_id(user_id).await?;
        let mut active: user::ActiveModel = user.into();
        active.profile_image = Set(Some(path.to_string()));
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Users holding a role within a faculty, ordered by name.
    pub async fn find_by_role_in_faculty(
        &self,
        role: Role,
        faculty_id: i32,
    ) -> AppResult<Vec<user::Model>> {
        User::find()
            .filter(user::Column::Role.eq(role))
            .filter(user::Column::FacultyId.eq(faculty_id))
            .order_by_asc(user::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Staff members of a faculty, optionally excluding one user.
    pub async fn find_staff_in_faculty(
        &self,
        faculty_id: i32,
        exclude_user_id: Option<i32>,
    ) -> AppResult<Vec<user::Model>> {
        let mut query = User::find()
            .filter(user::Column::FacultyId.eq(faculty_id))
            .filter(user::Column::Role.is_in(Role::STAFF));

        if let Some(id) = exclude_user_id {
            query = query.filter(user::Column::Id.ne(id));
        }

        query
            .order_by_asc(user::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All staff members across faculties, for the public directory.
    pub async fn find_all_staff(&self) -> AppResult<Vec<user::Model>> {
        User::find()
            .filter(user::Column::Role.is_in(Role::STAFF))
            .order_by_asc(user::Column::FacultyId)
            .order_by_asc(user::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count staff members.
    pub async fn count_staff(&self) -> AppResult<u64> {
        User::find()
            .filter(user::Column::Role.is_in(Role::STAFF))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count students.
    pub async fn count_students(&self) -> AppResult<u64> {
        User::find()
            .filter(user::Column::Role.eq(Role::Student))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Per-faculty staff counts grouped by role.
    pub async fn count_staff_grouped(&self) -> AppResult<Vec<StaffRoleCount>> {
        User::find()
            .select_only()
            .column(user::Column::FacultyId)
            .column(user::Column::Role)
            .column_as(user::Column::Id.count(), "count")
            .filter(user::Column::Role.is_in(Role::STAFF))
            .group_by(user::Column::FacultyId)
            .group_by(user::Column::Role)
            .into_model::<StaffRoleCount>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Per-faculty user counts for a role group.
    pub async fn count_by_faculty(&self, roles: &[Role]) -> AppResult<Vec<(i32, i64)>> {
        User::find()
            .select_only()
            .column(user::Column::FacultyId)
            .column_as(user::Column::Id.count(), "count")
            .filter(user::Column::Role.is_in(roles.to_vec()))
            .group_by(user::Column::FacultyId)
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
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_user(id: i32, email: &str, role: Role) -> user::Model {
        user::Model {
            id,
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            name: "Test User".to_string(),
            role,
            faculty_id: 1,
            is_class_rep: false,
            class_id: None,
            profile_image: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let user = create_test_user(1, "a@example.com", Role::Student);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_id(1).await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().email, "a@example.com");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.get_by_id(42).await;

        assert!(result.is_err());
        match result {
            Err(AppError::UserNotFound(id)) => assert_eq!(id, "42"),
            _ => panic!("Expected UserNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let user = create_test_user(1, "lect@example.com", Role::Lecturer);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_email("lect@example.com").await.unwrap();

        assert_eq!(result.unwrap().role, Role::Lecturer);
    }

    #[tokio::test]
    async fn test_create_user() {
        let user = create_test_user(7, "new@example.com", Role::Student);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 7,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = UserRepository::new(db);

        let active = user::ActiveModel {
            email: Set("new@example.com".to_string()),
            password_hash: Set("$argon2id$test".to_string()),
            name: Set("Test User".to_string()),
            role: Set(Role::Student),
            faculty_id: Set(1),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.email, "new@example.com");
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = UserRepository::new(db);
        let result = repo.find_by_ids(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_find_staff_in_faculty_excludes_caller() {
        let staff = create_test_user(2, "prl@example.com", Role::Prl);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[staff]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_staff_in_faculty(1, Some(9)).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }
}

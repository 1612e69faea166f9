//! Academic directory service.
//!
//! Reference lists for faculties, courses, and classes, plus class
//! creation. The unauthenticated lists feed registration choice lists.

use reporter_common::{AppError, AppResult};
use reporter_db::{
    entities::{class, course, faculty, user},
    repositories::{ClassRepository, CourseRepository, FacultyRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for creating a class.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    pub course_id: i32,

    #[validate(range(min = 1))]
    pub total_students: i32,
}

/// A class joined with its course name.
#[derive(Debug, Serialize)]
pub struct ClassView {
    #[serde(flatten)]
    pub class: class::Model,
    pub course_name: Option<String>,
}

/// Directory service.
#[derive(Clone)]
pub struct DirectoryService {
    faculty_repo: FacultyRepository,
    course_repo: CourseRepository,
    class_repo: ClassRepository,
}

impl DirectoryService {
    /// Create a new directory service.
    #[must_use]
    pub const fn new(
        faculty_repo: FacultyRepository,
        course_repo: CourseRepository,
        class_repo: ClassRepository,
    ) -> Self {
        Self {
            faculty_repo,
            course_repo,
            class_repo,
        }
    }

    /// All faculties.
    pub async fn faculties(&self) -> AppResult<Vec<faculty::Model>> {
        self.faculty_repo.find_all().await
    }

    /// All courses.
    pub async fn courses(&self) -> AppResult<Vec<course::Model>> {
        self.course_repo.find_all().await
    }

    /// All classes.
    pub async fn classes(&self) -> AppResult<Vec<class::Model>> {
        self.class_repo.find_all().await
    }

    /// Classes whose course belongs to the caller's faculty, with
    /// course names attached.
    pub async fn classes_in_faculty(&self, actor: &user::Model) -> AppResult<Vec<ClassView>> {
        let classes = self.class_repo.find_by_faculty(actor.faculty_id).await?;

        let mut course_ids: Vec<i32> = classes.iter().map(|c| c.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();
        let courses = self.course_repo.find_by_ids(&course_ids).await?;

        Ok(classes
            .into_iter()
            .map(|c| ClassView {
                course_name: courses
                    .iter()
                    .find(|co| co.id == c.course_id)
                    .map(|co| co.name.clone()),
                class: c,
            })
            .collect())
    }

    /// A single class by id.
    pub async fn class(&self, id: i32) -> AppResult<class::Model> {
        self.class_repo.get_by_id(id).await
    }

    /// Create a class.
    pub async fn create_class(&self, input: CreateClassInput) -> AppResult<class::Model> {
        input.validate()?;

        if self.course_repo.find_by_id(input.course_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Course {}", input.course_id)));
        }

        self.class_repo
            .create(class::ActiveModel {
                name: Set(input.name),
                course_id: Set(input.course_id),
                total_students: Set(input.total_students),
                ..Default::default()
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::test_support::{test_class, test_course, test_user};
    use reporter_db::entities::Role;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> DirectoryService {
        DirectoryService::new(
            FacultyRepository::new(db.clone()),
            CourseRepository::new(db.clone()),
            ClassRepository::new(db),
        )
    }

    #[tokio::test]
    async fn classes_in_faculty_carry_course_names() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_class(7, 2, 45)]])
                .append_query_results([[test_course(2, 1)]])
                .into_connection(),
        );
        let svc = service(db);
        let actor = test_user(4, Role::Lecturer);

        let classes = svc.classes_in_faculty(&actor).await.unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].course_name.as_deref(), Some("Course 2"));
    }

    #[tokio::test]
    async fn creating_a_class_checks_the_course() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<course::Model>::new()])
                .into_connection(),
        );
        let svc = service(db);

        let err = svc
            .create_class(CreateClassInput {
                name: "BScIT-Y1".to_string(),
                course_id: 404,
                total_students: 45,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn missing_class_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<class::Model>::new()])
                .into_connection(),
        );
        let svc = service(db);

        let err = svc.class(404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn class_creation_round_trips() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_course(2, 1)]])
                .append_query_results([[test_class(7, 2, 45)]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 7,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let svc = service(db);

        let class = svc
            .create_class(CreateClassInput {
                name: "Class 7".to_string(),
                course_id: 2,
                total_students: 45,
            })
            .await
            .unwrap();
        assert_eq!(class.total_students, 45);
    }
}

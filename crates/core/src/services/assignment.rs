//! Course assignment service.
//!
//! Program Leaders hand courses to lecturers. Only a PL may assign, and
//! only within their own faculty.

use chrono::Utc;
use reporter_common::{AppError, AppResult};
use reporter_db::{
    entities::{assignment, user, Role},
    repositories::{AssignmentRepository, ClassRepository, CourseRepository, UserRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for assigning a course.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentInput {
    pub lecturer_id: i32,
    pub course_id: i32,
    pub class_id: i32,
}

/// An assignment enriched with display names.
#[derive(Debug, Serialize)]
pub struct AssignmentView {
    #[serde(flatten)]
    pub assignment: assignment::Model,
    pub lecturer_name: Option<String>,
    pub course_name: Option<String>,
    pub class_name: Option<String>,
    pub assigned_by_name: Option<String>,
}

/// Assignment service.
#[derive(Clone)]
pub struct AssignmentService {
    assignment_repo: AssignmentRepository,
    course_repo: CourseRepository,
    class_repo: ClassRepository,
    user_repo: UserRepository,
}

impl AssignmentService {
    /// Create a new assignment service.
    #[must_use]
    pub const fn new(
        assignment_repo: AssignmentRepository,
        course_repo: CourseRepository,
        class_repo: ClassRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            assignment_repo,
            course_repo,
            class_repo,
            user_repo,
        }
    }

    /// Assign a course to a lecturer.
    pub async fn create(
        &self,
        actor: &user::Model,
        input: CreateAssignmentInput,
    ) -> AppResult<assignment::Model> {
        input.validate()?;

        if actor.role != Role::Pl {
            return Err(AppError::Forbidden(
                "Only a Program Leader may assign courses".to_string(),
            ));
        }

        let course = self
            .course_repo
            .find_by_id(input.course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course {}", input.course_id)))?;

        if course.faculty_id != actor.faculty_id {
            return Err(AppError::Forbidden(
                "Course does not belong to your faculty".to_string(),
            ));
        }

        self.assignment_repo
            .create(assignment::ActiveModel {
                lecturer_id: Set(input.lecturer_id),
                course_id: Set(input.course_id),
                class_id: Set(input.class_id),
                assigned_by: Set(actor.id),
                assigned_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await
    }

    /// Assignments for courses in the caller's faculty, with names.
    pub async fn list(&self, actor: &user::Model) -> AppResult<Vec<AssignmentView>> {
        let assignments = self.assignment_repo.find_in_faculty(actor.faculty_id).await?;

        let mut user_ids: Vec<i32> = assignments
            .iter()
            .flat_map(|a| [a.lecturer_id, a.assigned_by])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let users = self.user_repo.find_by_ids(&user_ids).await?;

        let mut course_ids: Vec<i32> = assignments.iter().map(|a| a.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();
        let courses = self.course_repo.find_by_ids(&course_ids).await?;

        let mut class_ids: Vec<i32> = assignments.iter().map(|a| a.class_id).collect();
        class_ids.sort_unstable();
        class_ids.dedup();
        let classes = self.class_repo.find_by_ids(&class_ids).await?;

        Ok(assignments
            .into_iter()
            .map(|a| AssignmentView {
                lecturer_name: users
                    .iter()
                    .find(|u| u.id == a.lecturer_id)
                    .map(|u| u.name.clone()),
                assigned_by_name: users
                    .iter()
                    .find(|u| u.id == a.assigned_by)
                    .map(|u| u.name.clone()),
                course_name: courses
                    .iter()
                    .find(|c| c.id == a.course_id)
                    .map(|c| c.name.clone()),
                class_name: classes
                    .iter()
                    .find(|c| c.id == a.class_id)
                    .map(|c| c.name.clone()),
                assignment: a,
            })
            .collect())
    }
}

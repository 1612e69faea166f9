//! Report lifecycle service.
//!
//! Lecturers file reports, class representatives countersign them, and
//! reviewers mark them reviewed. A report is pending until signed and a
//! signature can land only once.

use chrono::Utc;
use reporter_common::{AppError, AppResult};
use reporter_db::{
    entities::{report, user, ReportStatus, Role},
    repositories::{
        ClassRepository, CourseRepository, FacultyRepository, ReportRepository, ReportScope,
        UserRepository,
    },
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for creating a lecture report.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportInput {
    pub class_id: i32,

    pub course_id: i32,

    #[validate(range(min = 1, max = 52))]
    pub week_number: i32,

    pub date_of_lecture: chrono::NaiveDate,

    #[validate(range(min = 0))]
    pub students_present: i32,

    #[validate(length(min = 1, max = 256))]
    pub venue: String,

    #[validate(length(min = 1, max = 64))]
    pub scheduled_time: String,

    #[validate(length(min = 1, max = 2000))]
    pub topic_taught: String,

    #[validate(length(min = 1, max = 2000))]
    pub learning_outcomes: String,

    #[validate(length(max = 2000))]
    pub recommendations: Option<String>,
}

/// Input for countersigning a report.
#[derive(Debug, Deserialize, Validate)]
pub struct SignReportInput {
    pub report_id: i32,

    /// Signature blob captured client-side.
    #[validate(length(min = 1))]
    pub signature: String,
}

/// A report enriched with display names for listing surfaces.
#[derive(Debug, Serialize)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: report::Model,
    pub lecturer_name: Option<String>,
    pub class_name: Option<String>,
    pub course_name: Option<String>,
    pub faculty_name: Option<String>,
}

/// Report service.
#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
    class_repo: ClassRepository,
    course_repo: CourseRepository,
    faculty_repo: FacultyRepository,
    user_repo: UserRepository,
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub const fn new(
        report_repo: ReportRepository,
        class_repo: ClassRepository,
        course_repo: CourseRepository,
        faculty_repo: FacultyRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            report_repo,
            class_repo,
            course_repo,
            faculty_repo,
            user_repo,
        }
    }

    /// File a new lecture report for the authenticated lecturer.
    ///
    /// Attendance may equal the class roll but never exceed it, and the
    /// lecture date cannot be in the future.
    pub async fn create(
        &self,
        actor: &user::Model,
        input: CreateReportInput,
    ) -> AppResult<report::Model> {
        input.validate()?;

        let class = self
            .class_repo
            .find_by_id(input.class_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Class {}", input.class_id)))?;

        if input.students_present > class.total_students {
            return Err(AppError::BadRequest(format!(
                "Students present ({}) cannot exceed total registered students ({})",
                input.students_present, class.total_students
            )));
        }

        if input.date_of_lecture > Utc::now().date_naive() {
            return Err(AppError::BadRequest(
                "Date of lecture cannot be in the future".to_string(),
            ));
        }

        self.report_repo
            .create(report::ActiveModel {
                faculty_id: Set(actor.faculty_id),
                class_id: Set(input.class_id),
                course_id: Set(input.course_id),
                lecturer_id: Set(actor.id),
                week_number: Set(input.week_number),
                date_of_lecture: Set(input.date_of_lecture),
                students_present: Set(input.students_present),
                venue: Set(input.venue),
                scheduled_time: Set(input.scheduled_time),
                topic_taught: Set(input.topic_taught),
                learning_outcomes: Set(input.learning_outcomes),
                recommendations: Set(input.recommendations),
                status: Set(ReportStatus::Pending),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await
    }

    /// Reports the caller may see, enriched with names.
    pub async fn list(&self, actor: &user::Model) -> AppResult<Vec<ReportView>> {
        let reports = self
            .report_repo
            .list(Self::scope_for(actor), None)
            .await?;
        self.enrich(reports).await
    }

    /// Listing scope for one caller.
    ///
    /// A student without a class sees nothing rather than everything, so
    /// the empty scope is pinned to an impossible class id.
    fn scope_for(actor: &user::Model) -> ReportScope {
        match actor.role {
            Role::Lecturer => ReportScope::Lecturer(actor.id),
            Role::Student => actor.class_id.map_or(ReportScope::Class(-1), ReportScope::Class),
            Role::Prl => ReportScope::Faculty(actor.faculty_id),
            Role::Pl | Role::Fmg => ReportScope::All,
        }
    }

    /// Countersign a pending report.
    pub async fn sign(&self, actor: &user::Model, input: SignReportInput) -> AppResult<report::Model> {
        input.validate()?;

        let report = self.report_repo.get_by_id(input.report_id).await?;

        let may_sign = actor.role == Role::Student
            && actor.is_class_rep
            && actor.class_id == Some(report.class_id);
        if !may_sign {
            return Err(AppError::Forbidden(
                "Only the class representative for this class may sign the report".to_string(),
            ));
        }

        if report.status != ReportStatus::Pending {
            return Err(AppError::Conflict(
                "This report has already been signed".to_string(),
            ));
        }

        self.report_repo
            .update(report::ActiveModel {
                id: Set(report.id),
                status: Set(ReportStatus::Signed),
                student_signature: Set(Some(input.signature)),
                signed_at: Set(Some(Utc::now().into())),
                ..Default::default()
            })
            .await
    }

    /// Attach lecturer, class, course, and faculty names.
    pub(crate) async fn enrich(&self, reports: Vec<report::Model>) -> AppResult<Vec<ReportView>> {
        let mut lecturer_ids: Vec<i32> = reports.iter().map(|r| r.lecturer_id).collect();
        lecturer_ids.sort_unstable();
        lecturer_ids.dedup();
        let lecturers = self.user_repo.find_by_ids(&lecturer_ids).await?;

        let mut class_ids: Vec<i32> = reports.iter().map(|r| r.class_id).collect();
        class_ids.sort_unstable();
        class_ids.dedup();
        let classes = self.class_repo.find_by_ids(&class_ids).await?;

        let mut course_ids: Vec<i32> = reports.iter().map(|r| r.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();
        let courses = self.course_repo.find_by_ids(&course_ids).await?;

        let faculties = self.faculty_repo.find_all().await?;

        Ok(reports
            .into_iter()
            .map(|r| ReportView {
                lecturer_name: lecturers
                    .iter()
                    .find(|u| u.id == r.lecturer_id)
                    .map(|u| u.name.clone()),
                class_name: classes
                    .iter()
                    .find(|c| c.id == r.class_id)
                    .map(|c| c.name.clone()),
                course_name: courses
                    .iter()
                    .find(|c| c.id == r.course_id)
                    .map(|c| c.name.clone()),
                faculty_name: faculties
                    .iter()
                    .find(|f| f.id == r.faculty_id)
                    .map(|f| f.name.clone()),
                report: r,
            })
            .collect())
    }
}

//! Report repository.

use std::sync::Arc;

use crate::entities::{report, Report, ReportStatus};
use reporter_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// Which slice of reports a caller may see.
///
/// Listing is role-filtered at query time; the service layer picks the
/// scope from the caller's role and the repository turns it into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// Reports filed by one lecturer.
    Lecturer(i32),
    /// Reports for one class.
    Class(i32),
    /// Reports within one faculty.
    Faculty(i32),
    /// No filter.
    All,
}

impl ReportScope {
    fn condition(self) -> Condition {
        match self {
            Self::Lecturer(id) => Condition::all().add(report::Column::LecturerId.eq(id)),
            Self::Class(id) => Condition::all().add(report::Column::ClassId.eq(id)),
            Self::Faculty(id) => Condition::all().add(report::Column::FacultyId.eq(id)),
            Self::All => Condition::all(),
        }
    }
}

/// Report repository for database operations.
#[derive(Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a report by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<report::Model>> {
        Report::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a report by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<report::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {id}")))
    }

    /// Create a new report.
    pub async fn create(&self, model: report::ActiveModel) -> AppResult<report::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| crate::translate_write_err(&e, "Report already exists"))
    }

    /// Update a report.
    pub async fn update(&self, model: report::ActiveModel) -> AppResult<report::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Reports visible within a scope, newest first, with an optional
    /// inclusive lecture-date range.
    pub async fn list(
        &self,
        scope: ReportScope,
        date_range: Option<(chrono::NaiveDate, chrono::NaiveDate)>,
    ) -> AppResult<Vec<report::Model>> {
        let mut condition = scope.condition();

        if let Some((start, end)) = date_range {
            condition = condition.add(report::Column::DateOfLecture.between(start, end));
        }

        Report::find()
            .filter(condition)
            .order_by_desc(report::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Latest signed reports for the public landing page.
    pub async fn find_recent_signed(&self, limit: u64) -> AppResult<Vec<report::Model>> {
        Report::find()
            .filter(report::Column::Status.eq(ReportStatus::Signed))
            .order_by_desc(report::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count signed reports.
    pub async fn count_signed(&self) -> AppResult<u64> {
        Report::find()
            .filter(report::Column::Status.eq(ReportStatus::Signed))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sea_orm::{DatabaseBackend, DbBackend, MockDatabase, QueryTrait};
    use std::sync::Arc;

    fn test_report(id: i32, lecturer_id: i32, status: ReportStatus) -> report::Model {
        report::Model {
            id,
            faculty_id: 1,
            class_id: 7,
            course_id: 2,
            lecturer_id,
            week_number: 6,
            date_of_lecture: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            students_present: 40,
            venue: "Room 12".to_string(),
            scheduled_time: "08:00 - 10:00".to_string(),
            topic_taught: "REST APIs".to_string(),
            learning_outcomes: "Design resource-oriented endpoints".to_string(),
            recommendations: None,
            status,
            student_signature: None,
            signed_at: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_list_by_lecturer() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_report(1, 5, ReportStatus::Pending)]])
                .into_connection(),
        );

        let repo = ReportRepository::new(db);
        let result = repo.list(ReportScope::Lecturer(5), None).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].lecturer_id, 5);
    }

    #[test]
    fn scope_conditions_render_expected_sql() {
        let cases = [
            (ReportScope::Lecturer(5), "\"lecturer_id\" = 5"),
            (ReportScope::Class(7), "\"class_id\" = 7"),
            (ReportScope::Faculty(3), "\"faculty_id\" = 3"),
        ];

        for (scope, expected) in cases {
            let sql = Report::find()
                .filter(scope.condition())
                .build(DbBackend::Postgres)
                .to_string();
            assert!(sql.contains(expected), "{sql} should contain {expected}");
        }

        // The unfiltered scope renders a constant-true filter
        let sql = Report::find()
            .filter(ReportScope::All.condition())
            .build(DbBackend::Postgres)
            .to_string();
        let filter = sql.split_once("WHERE").map_or("", |(_, w)| w);
        assert_eq!(filter.trim(), "TRUE", "{sql} should not restrict rows");
    }

    #[test]
    fn date_range_is_inclusive_between() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        let sql = Report::find()
            .filter(
                ReportScope::All
                    .condition()
                    .add(report::Column::DateOfLecture.between(start, end)),
            )
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("BETWEEN"));
    }
}

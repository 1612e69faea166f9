//! Rating repository.

use std::sync::Arc;

use crate::entities::{rating, Rating};
use reporter_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

/// Rating repository for database operations.
#[derive(Clone)]
pub struct RatingRepository {
    db: Arc<DatabaseConnection>,
}

impl RatingRepository {
    /// Create a new rating repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a rating. Duplicate (rater, target) pairs trip the partial
    /// unique indexes and come back as a conflict.
    pub async fn create(&self, model: rating::ActiveModel) -> AppResult<rating::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| crate::translate_write_err(&e, "You have already rated this target"))
    }

    /// Ratings submitted by one student, newest first, with an optional
    /// inclusive creation-date range.
    pub async fn find_by_student(
        &self,
        student_id: i32,
        date_range: Option<(chrono::NaiveDate, chrono::NaiveDate)>,
    ) -> AppResult<Vec<rating::Model>> {
        let mut condition = Condition::all().add(rating::Column::StudentId.eq(student_id));

        if let Some((start, end)) = date_range {
            condition = condition.add(created_between(start, end));
        }

        Rating::find()
            .filter(condition)
            .order_by_desc(rating::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Ratings aimed at any of the given reports or lecturers.
    ///
    /// A lecturer's feed covers both ratings on their reports and ratings
    /// about them directly, so the two target sets are ORed here.
    pub async fn find_by_targets(
        &self,
        report_ids: &[i32],
        lecturer_ids: &[i32],
    ) -> AppResult<Vec<rating::Model>> {
        let mut condition = Condition::any();
        if !report_ids.is_empty() {
            condition = condition.add(rating::Column::ReportId.is_in(report_ids.iter().copied()));
        }
        if !lecturer_ids.is_empty() {
            condition =
                condition.add(rating::Column::LecturerId.is_in(lecturer_ids.iter().copied()));
        }

        Rating::find()
            .filter(condition)
            .order_by_desc(rating::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Every rating, newest first. Staff monitoring views filter the result
    /// by faculty after joining in report data.
    pub async fn find_all(&self) -> AppResult<Vec<rating::Model>> {
        Rating::find()
            .order_by_desc(rating::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

fn created_between(start: chrono::NaiveDate, end: chrono::NaiveDate) -> Condition {
    Condition::all().add(rating::Column::CreatedAt.between(
        start.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
        end.and_hms_opt(23, 59, 59).unwrap_or_default().and_utc(),
    ))
}

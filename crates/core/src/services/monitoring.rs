//! Monitoring service.
//!
//! Oversight view of reports with per-report rating aggregates. The
//! aggregation happens in the service over a batch fetch, one query for
//! the reports and one for their ratings.

use reporter_common::AppResult;
use reporter_db::{
    entities::{report, user, Role},
    repositories::{ClassRepository, RatingRepository, ReportRepository, ReportScope, UserRepository},
};
use serde::Serialize;

/// A report with its rating aggregates for the monitoring table.
#[derive(Debug, Serialize)]
pub struct MonitoringRow {
    #[serde(flatten)]
    pub report: report::Model,
    pub lecturer_name: Option<String>,
    pub class_name: Option<String>,
    pub rating_count: usize,
    pub average_rating: Option<f64>,
}

/// Monitoring service.
#[derive(Clone)]
pub struct MonitoringService {
    report_repo: ReportRepository,
    rating_repo: RatingRepository,
    user_repo: UserRepository,
    class_repo: ClassRepository,
}

impl MonitoringService {
    /// Create a new monitoring service.
    #[must_use]
    pub const fn new(
        report_repo: ReportRepository,
        rating_repo: RatingRepository,
        user_repo: UserRepository,
        class_repo: ClassRepository,
    ) -> Self {
        Self {
            report_repo,
            rating_repo,
            user_repo,
            class_repo,
        }
    }

    /// Reports in the caller's monitoring scope with rating aggregates.
    ///
    /// Lecturers monitor their own reports and reviewers their faculty.
    /// Students and faculty management get the unfiltered view.
    pub async fn overview(&self, actor: &user::Model) -> AppResult<Vec<MonitoringRow>> {
        let scope = match actor.role {
            Role::Lecturer => ReportScope::Lecturer(actor.id),
            Role::Prl | Role::Pl => ReportScope::Faculty(actor.faculty_id),
            Role::Student | Role::Fmg => ReportScope::All,
        };

        let reports = self.report_repo.list(scope, None).await?;

        let report_ids: Vec<i32> = reports.iter().map(|r| r.id).collect();
        let ratings = self.rating_repo.find_by_targets(&report_ids, &[]).await?;

        let mut lecturer_ids: Vec<i32> = reports.iter().map(|r| r.lecturer_id).collect();
        lecturer_ids.sort_unstable();
        lecturer_ids.dedup();
        let lecturers = self.user_repo.find_by_ids(&lecturer_ids).await?;

        let mut class_ids: Vec<i32> = reports.iter().map(|r| r.class_id).collect();
        class_ids.sort_unstable();
        class_ids.dedup();
        let classes = self.class_repo.find_by_ids(&class_ids).await?;

        Ok(reports
            .into_iter()
            .map(|r| {
                let scores: Vec<i32> = ratings
                    .iter()
                    .filter(|rt| rt.report_id == Some(r.id))
                    .map(|rt| rt.rating)
                    .collect();
                let average_rating = (!scores.is_empty()).then(|| {
                    f64::from(scores.iter().sum::<i32>()) / scores.len() as f64
                });

                MonitoringRow {
                    lecturer_name: lecturers
                        .iter()
                        .find(|u| u.id == r.lecturer_id)
                        .map(|u| u.name.clone()),
                    class_name: classes
                        .iter()
                        .find(|c| c.id == r.class_id)
                        .map(|c| c.name.clone()),
                    rating_count: scores.len(),
                    average_rating,
                    report: r,
                }
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::test_support::{test_class, test_report, test_user};
    use chrono::Utc;
    use reporter_db::entities::{rating, ReportStatus};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> MonitoringService {
        MonitoringService::new(
            ReportRepository::new(db.clone()),
            RatingRepository::new(db.clone()),
            UserRepository::new(db.clone()),
            ClassRepository::new(db),
        )
    }

    fn score(id: i32, report_id: i32, value: i32) -> rating::Model {
        rating::Model {
            id,
            report_id: Some(report_id),
            lecturer_id: None,
            student_id: 9,
            rating: value,
            comment: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn aggregates_count_and_average_per_report() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    test_report(1, 4, ReportStatus::Signed),
                    test_report(2, 4, ReportStatus::Pending),
                ]])
                .append_query_results([[score(1, 1, 5), score(2, 1, 4)]])
                .append_query_results([[test_user(4, Role::Lecturer)]])
                .append_query_results([[test_class(7, 2, 45)]])
                .into_connection(),
        );
        let svc = service(db);
        let lecturer = test_user(4, Role::Lecturer);

        let rows = svc.overview(&lecturer).await.unwrap();
        assert_eq!(rows.len(), 2);

        let first = rows.iter().find(|r| r.report.id == 1).unwrap();
        assert_eq!(first.rating_count, 2);
        assert_eq!(first.average_rating, Some(4.5));

        let second = rows.iter().find(|r| r.report.id == 2).unwrap();
        assert_eq!(second.rating_count, 0);
        assert!(second.average_rating.is_none());
    }
}

//! Rating service.
//!
//! Students rate either a report or a lecturer, never both in one row.
//! One rating per (rater, target) pair, enforced by the partial unique
//! indexes rather than a pre-insert lookup.

use chrono::Utc;
use reporter_common::{AppError, AppResult};
use reporter_db::{
    entities::{rating, user, Role},
    repositories::{RatingRepository, ReportRepository, ReportScope, UserRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for submitting a rating.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRatingInput {
    pub report_id: Option<i32>,

    pub lecturer_id: Option<i32>,

    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

/// A rating enriched with display names.
#[derive(Debug, Serialize)]
pub struct RatingView {
    #[serde(flatten)]
    pub rating: rating::Model,
    pub student_name: Option<String>,
    pub lecturer_name: Option<String>,
    pub topic_taught: Option<String>,
}

/// A staff member offered as a rating target.
#[derive(Debug, Serialize)]
pub struct RatingTarget {
    pub id: i32,
    pub name: String,
    pub role: Role,
    pub position_title: &'static str,
}

/// Rating service.
#[derive(Clone)]
pub struct RatingService {
    rating_repo: RatingRepository,
    report_repo: ReportRepository,
    user_repo: UserRepository,
}

impl RatingService {
    /// Create a new rating service.
    #[must_use]
    pub const fn new(
        rating_repo: RatingRepository,
        report_repo: ReportRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            rating_repo,
            report_repo,
            user_repo,
        }
    }

    /// Submit a rating on behalf of the authenticated user.
    pub async fn create(
        &self,
        actor: &user::Model,
        input: CreateRatingInput,
    ) -> AppResult<rating::Model> {
        input.validate()?;

        match (input.report_id, input.lecturer_id) {
            (Some(_), None) | (None, Some(_)) => {}
            _ => {
                return Err(AppError::BadRequest(
                    "Provide exactly one of report_id or lecturer_id".to_string(),
                ));
            }
        }

        if input.lecturer_id == Some(actor.id) {
            return Err(AppError::BadRequest(
                "You cannot rate yourself".to_string(),
            ));
        }

        if let Some(report_id) = input.report_id {
            self.report_repo.get_by_id(report_id).await?;
        }

        self.rating_repo
            .create(rating::ActiveModel {
                report_id: Set(input.report_id),
                lecturer_id: Set(input.lecturer_id),
                student_id: Set(actor.id),
                rating: Set(input.rating),
                comment: Set(input.comment),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await
    }

    /// Ratings the caller may see, enriched with names.
    ///
    /// Students see what they submitted, lecturers see feedback aimed at
    /// them or their reports, and staff see their faculty's feedback.
    pub async fn list(&self, actor: &user::Model) -> AppResult<Vec<RatingView>> {
        let ratings = match actor.role {
            Role::Student => self.rating_repo.find_by_student(actor.id, None).await?,
            Role::Lecturer => {
                let own_reports = self
                    .report_repo
                    .list(ReportScope::Lecturer(actor.id), None)
                    .await?;
                let report_ids: Vec<i32> = own_reports.iter().map(|r| r.id).collect();
                self.rating_repo
                    .find_by_targets(&report_ids, &[actor.id])
                    .await?
            }
            Role::Prl | Role::Pl | Role::Fmg => {
                let faculty_reports = self
                    .report_repo
                    .list(ReportScope::Faculty(actor.faculty_id), None)
                    .await?;
                let report_ids: Vec<i32> = faculty_reports.iter().map(|r| r.id).collect();

                let staff = self
                    .user_repo
                    .find_staff_in_faculty(actor.faculty_id, None)
                    .await?;
                let staff_ids: Vec<i32> = staff.iter().map(|u| u.id).collect();

                self.rating_repo
                    .find_by_targets(&report_ids, &staff_ids)
                    .await?
            }
        };

        self.enrich(ratings).await
    }

    /// Staff in the caller's faculty offered as rating targets, excluding
    /// the caller.
    pub async fn rating_targets(&self, actor: &user::Model) -> AppResult<Vec<RatingTarget>> {
        let staff = self
            .user_repo
            .find_staff_in_faculty(actor.faculty_id, Some(actor.id))
            .await?;

        Ok(staff
            .into_iter()
            .map(|u| RatingTarget {
                id: u.id,
                name: u.name,
                role: u.role,
                position_title: u.role.position_title(),
            })
            .collect())
    }

    /// Attach rater, lecturer, and report topic names.
    async fn enrich(&self, ratings: Vec<rating::Model>) -> AppResult<Vec<RatingView>> {
        let mut user_ids: Vec<i32> = ratings
            .iter()
            .flat_map(|r| [Some(r.student_id), r.lecturer_id])
            .flatten()
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let users = self.user_repo.find_by_ids(&user_ids).await?;

        let mut reports = Vec::new();
        let mut report_ids: Vec<i32> = ratings.iter().filter_map(|r| r.report_id).collect();
        report_ids.sort_unstable();
        report_ids.dedup();
        for id in report_ids {
            if let Some(report) = self.report_repo.find_by_id(id).await? {
                reports.push(report);
            }
        }

        Ok(ratings
            .into_iter()
            .map(|r| RatingView {
                student_name: users
                    .iter()
                    .find(|u| u.id == r.student_id)
                    .map(|u| u.name.clone()),
                lecturer_name: r.lecturer_id.and_then(|id| {
                    users.iter().find(|u| u.id == id).map(|u| u.name.clone())
                }),
                topic_taught: r.report_id.and_then(|id| {
                    reports
                        .iter()
                        .find(|rep| rep.id == id)
                        .map(|rep| rep.topic_taught.clone())
                }),
                rating: r,
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::test_support::{test_report, test_user};
    use reporter_db::entities::ReportStatus;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> RatingService {
        RatingService::new(
            RatingRepository::new(db.clone()),
            ReportRepository::new(db.clone()),
            UserRepository::new(db),
        )
    }

    #[tokio::test]
    async fn rating_must_target_exactly_one_thing() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);
        let student = test_user(9, Role::Student);

        for (report_id, lecturer_id) in [(None, None), (Some(1), Some(4))] {
            let err = svc
                .create(
                    &student,
                    CreateRatingInput {
                        report_id,
                        lecturer_id,
                        rating: 4,
                        comment: None,
                    },
                )
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }

    #[tokio::test]
    async fn out_of_range_score_is_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);
        let student = test_user(9, Role::Student);

        for score in [0, 6] {
            let err = svc
                .create(
                    &student,
                    CreateRatingInput {
                        report_id: Some(1),
                        lecturer_id: None,
                        rating: score,
                        comment: None,
                    },
                )
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn self_rating_is_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);
        let lecturer = test_user(4, Role::Lecturer);

        let err = svc
            .create(
                &lecturer,
                CreateRatingInput {
                    report_id: None,
                    lecturer_id: Some(4),
                    rating: 5,
                    comment: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn rating_a_missing_report_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<reporter_db::entities::report::Model>::new()])
                .into_connection(),
        );
        let svc = service(db);
        let student = test_user(9, Role::Student);

        let err = svc
            .create(
                &student,
                CreateRatingInput {
                    report_id: Some(404),
                    lecturer_id: None,
                    rating: 4,
                    comment: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn valid_report_rating_is_stored() {
        let stored = rating::Model {
            id: 1,
            report_id: Some(1),
            lecturer_id: None,
            student_id: 9,
            rating: 5,
            comment: None,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_report(1, 4, ReportStatus::Signed)]])
                .append_query_results([[stored]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let svc = service(db);
        let student = test_user(9, Role::Student);

        let rating = svc
            .create(
                &student,
                CreateRatingInput {
                    report_id: Some(1),
                    lecturer_id: None,
                    rating: 5,
                    comment: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(rating.student_id, 9);
        assert_eq!(rating.report_id, Some(1));
        assert_eq!(rating.rating, 5);
    }

    #[tokio::test]
    async fn rating_targets_exclude_the_caller() {
        let staff = vec![test_user(2, Role::Pl), test_user(3, Role::Prl)];
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([staff])
                .into_connection(),
        );
        let svc = service(db);
        let lecturer = test_user(4, Role::Lecturer);

        let targets = svc.rating_targets(&lecturer).await.unwrap();
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|t| t.id != 4));
        assert_eq!(targets[0].position_title, "Program Leader");
    }
}

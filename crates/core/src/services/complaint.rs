//! Complaint service.
//!
//! Complaints escalate one level up a fixed hierarchy. The recipient role
//! is computed once at creation and stored on the row, so later role
//! changes never re-route an open complaint.

use chrono::Utc;
use reporter_common::{AppError, AppResult};
use reporter_db::{
    entities::{complaint, ComplaintStatus, Role},
    repositories::{ClassRepository, ComplaintRepository, ReportRepository, UserRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Who answers a complaint, given who filed it and who it targets.
///
/// | complainant | target | recipient |
/// |---|---|---|
/// | student | any | prl |
/// | lecturer | prl | pl |
/// | lecturer | other | prl |
/// | prl | pl | fmg |
/// | prl | other | pl |
/// | pl | any | fmg |
/// | fmg | any | fmg |
#[must_use]
pub const fn recipient_for(complainant: Role, target: Role) -> Role {
    match (complainant, target) {
        (Role::Student, _) => Role::Prl,
        (Role::Lecturer, Role::Prl) => Role::Pl,
        (Role::Lecturer, _) => Role::Prl,
        (Role::Prl, Role::Pl) | (Role::Pl | Role::Fmg, _) => Role::Fmg,
        (Role::Prl, _) => Role::Pl,
    }
}

/// Input for filing a complaint.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateComplaintInput {
    pub complaint_against_id: i32,

    pub report_id: Option<i32>,

    #[validate(length(min = 1, max = 4000))]
    pub complaint_text: String,
}

/// Input for responding to a complaint.
#[derive(Debug, Deserialize, Validate)]
pub struct RespondInput {
    pub complaint_id: i32,

    #[validate(length(min = 1, max = 4000))]
    pub response_text: String,
}

/// A complaint enriched with display names for the listing surfaces.
#[derive(Debug, Serialize)]
pub struct ComplaintView {
    #[serde(flatten)]
    pub complaint: complaint::Model,
    pub complainant_name: Option<String>,
    pub complaint_against_name: Option<String>,
    pub responder_name: Option<String>,
    pub topic_taught: Option<String>,
    pub class_name: Option<String>,
}

/// Complaint service.
#[derive(Clone)]
pub struct ComplaintService {
    complaint_repo: ComplaintRepository,
    user_repo: UserRepository,
    report_repo: ReportRepository,
    class_repo: ClassRepository,
}

impl ComplaintService {
    /// Create a new complaint service.
    #[must_use]
    pub const fn new(
        complaint_repo: ComplaintRepository,
        user_repo: UserRepository,
        report_repo: ReportRepository,
        class_repo: ClassRepository,
    ) -> Self {
        Self {
            complaint_repo,
            user_repo,
            report_repo,
            class_repo,
        }
    }

    /// File a complaint on behalf of the authenticated user.
    pub async fn create(
        &self,
        actor: &reporter_db::entities::user::Model,
        input: CreateComplaintInput,
    ) -> AppResult<complaint::Model> {
        input.validate()?;

        if input.complaint_against_id == actor.id {
            return Err(AppError::Validation(
                "You cannot file a complaint against yourself".to_string(),
            ));
        }

        let target = self
            .user_repo
            .find_by_id(input.complaint_against_id)
            .await?
            .ok_or_else(|| {
                AppError::UserNotFound(
                    "The person this complaint is against was not found".to_string(),
                )
            })?;

        let recipient_role = recipient_for(actor.role, target.role);

        self.complaint_repo
            .create(complaint::ActiveModel {
                complainant_id: Set(actor.id),
                complaint_against_id: Set(target.id),
                report_id: Set(input.report_id),
                complaint_text: Set(input.complaint_text),
                status: Set(ComplaintStatus::Pending),
                recipient_role: Set(recipient_role),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await
    }

    /// Complaints the caller may see, enriched with names.
    pub async fn list(
        &self,
        actor: &reporter_db::entities::user::Model,
    ) -> AppResult<Vec<ComplaintView>> {
        let complaints = self.complaint_repo.list_visible(actor.id, actor.role).await?;
        self.enrich(complaints).await
    }

    /// Pending complaints the caller can answer.
    pub async fn list_for_response(
        &self,
        actor: &reporter_db::entities::user::Model,
    ) -> AppResult<Vec<ComplaintView>> {
        let complaints = self
            .complaint_repo
            .list_for_response(actor.id, actor.role)
            .await?;
        self.enrich(complaints).await
    }

    /// Record a response and resolve the complaint.
    ///
    /// A resolved complaint cannot be answered again; the first response
    /// wins and later attempts get a conflict.
    pub async fn respond(
        &self,
        actor: &reporter_db::entities::user::Model,
        input: RespondInput,
    ) -> AppResult<complaint::Model> {
        input.validate()?;

        let complaint = self.complaint_repo.get_by_id(input.complaint_id).await?;

        let authorized =
            actor.role == complaint.recipient_role || actor.id == complaint.complaint_against_id;
        if !authorized {
            return Err(AppError::Forbidden(
                "You are not authorized to respond to this complaint".to_string(),
            ));
        }

        if complaint.status == ComplaintStatus::Resolved {
            return Err(AppError::Conflict(
                "This complaint has already been resolved".to_string(),
            ));
        }

        self.complaint_repo
            .update(complaint::ActiveModel {
                id: Set(complaint.id),
                response_text: Set(Some(input.response_text)),
                responded_by: Set(Some(actor.id)),
                responded_at: Set(Some(Utc::now().into())),
                status: Set(ComplaintStatus::Resolved),
                ..Default::default()
            })
            .await
    }

    /// Attach complainant, target, responder, report topic, and class name.
    async fn enrich(&self, complaints: Vec<complaint::Model>) -> AppResult<Vec<ComplaintView>> {
        let mut user_ids: Vec<i32> = complaints
            .iter()
            .flat_map(|c| {
                [
                    Some(c.complainant_id),
                    Some(c.complaint_against_id),
                    c.responded_by,
                ]
            })
            .flatten()
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let mut report_ids: Vec<i32> = complaints.iter().filter_map(|c| c.report_id).collect();
        report_ids.sort_unstable();
        report_ids.dedup();

        let users = self.user_repo.find_by_ids(&user_ids).await?;
        let name_of = |id: i32| {
            users
                .iter()
                .find(|u| u.id == id)
                .map(|u| u.name.clone())
        };

        let mut reports = Vec::new();
        for id in report_ids {
            if let Some(report) = self.report_repo.find_by_id(id).await? {
                reports.push(report);
            }
        }

        let mut class_ids: Vec<i32> = reports.iter().map(|r| r.class_id).collect();
        class_ids.sort_unstable();
        class_ids.dedup();
        let classes = self.class_repo.find_by_ids(&class_ids).await?;

        Ok(complaints
            .into_iter()
            .map(|c| {
                let report = c
                    .report_id
                    .and_then(|id| reports.iter().find(|r| r.id == id));
                let class_name = report.and_then(|r| {
                    classes
                        .iter()
                        .find(|cl| cl.id == r.class_id)
                        .map(|cl| cl.name.clone())
                });

                ComplaintView {
                    complainant_name: name_of(c.complainant_id),
                    complaint_against_name: name_of(c.complaint_against_id),
                    responder_name: c.responded_by.and_then(name_of),
                    topic_taught: report.map(|r| r.topic_taught.clone()),
                    class_name,
                    complaint: c,
                }
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::test_support::test_user;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> ComplaintService {
        ComplaintService::new(
            ComplaintRepository::new(db.clone()),
            UserRepository::new(db.clone()),
            ReportRepository::new(db.clone()),
            ClassRepository::new(db),
        )
    }

    fn pending_complaint(id: i32, recipient_role: Role) -> complaint::Model {
        complaint::Model {
            id,
            complainant_id: 9,
            complaint_against_id: 4,
            report_id: None,
            complaint_text: "Lecture started late".to_string(),
            status: ComplaintStatus::Pending,
            recipient_role,
            response_text: None,
            responded_by: None,
            responded_at: None,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn routing_table_is_exact() {
        // Students always escalate to prl, whoever the target is
        for target in [Role::Student, Role::Lecturer, Role::Prl, Role::Pl, Role::Fmg] {
            assert_eq!(recipient_for(Role::Student, target), Role::Prl);
        }

        assert_eq!(recipient_for(Role::Lecturer, Role::Prl), Role::Pl);
        assert_eq!(recipient_for(Role::Lecturer, Role::Student), Role::Prl);
        assert_eq!(recipient_for(Role::Lecturer, Role::Lecturer), Role::Prl);

        assert_eq!(recipient_for(Role::Prl, Role::Pl), Role::Fmg);
        assert_eq!(recipient_for(Role::Prl, Role::Lecturer), Role::Pl);

        for target in [Role::Student, Role::Lecturer, Role::Prl, Role::Pl, Role::Fmg] {
            assert_eq!(recipient_for(Role::Pl, target), Role::Fmg);
            assert_eq!(recipient_for(Role::Fmg, target), Role::Fmg);
        }
    }

    #[tokio::test]
    async fn self_complaint_is_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);
        let actor = test_user(9, Role::Student);

        let err = svc
            .create(
                &actor,
                CreateComplaintInput {
                    complaint_against_id: 9,
                    report_id: None,
                    complaint_text: "self".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_target_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<reporter_db::entities::user::Model>::new()])
                .into_connection(),
        );
        let svc = service(db);
        let actor = test_user(9, Role::Student);

        let err = svc
            .create(
                &actor,
                CreateComplaintInput {
                    complaint_against_id: 404,
                    report_id: None,
                    complaint_text: "missing".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn create_stores_computed_recipient() {
        let target = test_user(4, Role::Lecturer);
        let stored = pending_complaint(1, Role::Prl);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[target]])
                .append_query_results([[stored]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let svc = service(db);
        let actor = test_user(9, Role::Student);

        let complaint = svc
            .create(
                &actor,
                CreateComplaintInput {
                    complaint_against_id: 4,
                    report_id: None,
                    complaint_text: "Lecture started late".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(complaint.recipient_role, Role::Prl);
        assert_eq!(complaint.status, ComplaintStatus::Pending);
    }

    #[tokio::test]
    async fn respond_requires_recipient_role_or_target() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending_complaint(1, Role::Prl)]])
                .into_connection(),
        );
        let svc = service(db);
        let outsider = test_user(2, Role::Lecturer);

        let err = svc
            .respond(
                &outsider,
                RespondInput {
                    complaint_id: 1,
                    response_text: "noted".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn resolved_complaint_rejects_second_response() {
        let mut resolved = pending_complaint(1, Role::Prl);
        resolved.status = ComplaintStatus::Resolved;
        resolved.response_text = Some("handled".to_string());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[resolved]])
                .into_connection(),
        );
        let svc = service(db);
        let reviewer = test_user(3, Role::Prl);

        let err = svc
            .respond(
                &reviewer,
                RespondInput {
                    complaint_id: 1,
                    response_text: "again".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn target_may_respond_to_pending_complaint() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending_complaint(1, Role::Prl)]])
                .append_query_results([[complaint::Model {
                    status: ComplaintStatus::Resolved,
                    response_text: Some("sorted".to_string()),
                    responded_by: Some(4),
                    responded_at: Some(Utc::now().into()),
                    ..pending_complaint(1, Role::Prl)
                }]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let svc = service(db);
        let target = test_user(4, Role::Lecturer);

        let updated = svc
            .respond(
                &target,
                RespondInput {
                    complaint_id: 1,
                    response_text: "sorted".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ComplaintStatus::Resolved);
        assert_eq!(updated.responded_by, Some(4));
    }
}

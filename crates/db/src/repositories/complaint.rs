//! Complaint repository.

use std::sync::Arc;

use crate::entities::{complaint, Complaint, ComplaintStatus, Role};
use reporter_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

/// Build the visibility filter for one caller.
///
/// The against-self exclusion is applied before any role branch, so a
/// complaint never shows up in its own target's listing. Targets still get
/// to see and answer complaints against them through the response queue.
#[must_use]
pub fn visibility_condition(user_id: i32, role: Role) -> Condition {
    let role_filter = match role {
        Role::Student => Condition::all().add(complaint::Column::ComplainantId.eq(user_id)),
        Role::Lecturer => Condition::any()
            .add(complaint::Column::ComplaintAgainstId.eq(user_id))
            .add(complaint::Column::ComplainantId.eq(user_id)),
        Role::Prl | Role::Pl => Condition::any()
            .add(complaint::Column::RecipientRole.eq(role))
            .add(complaint::Column::ComplainantId.eq(user_id)),
        Role::Fmg => Condition::all(),
    };

    Condition::all()
        .add(complaint::Column::ComplaintAgainstId.ne(user_id))
        .add(role_filter)
}

/// Complaint repository for database operations.
#[derive(Clone)]
pub struct ComplaintRepository {
    db: Arc<DatabaseConnection>,
}

impl ComplaintRepository {
    /// Create a new complaint repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a complaint by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<complaint::Model>> {
        Complaint::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a complaint by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<complaint::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Complaint {id}")))
    }

    /// Create a new complaint.
    pub async fn create(&self, model: complaint::ActiveModel) -> AppResult<complaint::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| crate::translate_write_err(&e, "Complaint already exists"))
    }

    /// Update a complaint.
    pub async fn update(&self, model: complaint::ActiveModel) -> AppResult<complaint::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Complaints the caller may see, newest first.
    pub async fn list_visible(&self, user_id: i32, role: Role) -> AppResult<Vec<complaint::Model>> {
        Complaint::find()
            .filter(visibility_condition(user_id, role))
            .order_by_desc(complaint::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Pending complaints the caller is allowed to answer, either because
    /// their role is the assigned recipient or because they are the target.
    pub async fn list_for_response(
        &self,
        user_id: i32,
        role: Role,
    ) -> AppResult<Vec<complaint::Model>> {
        Complaint::find()
            .filter(complaint::Column::Status.eq(ComplaintStatus::Pending))
            .filter(
                Condition::any()
                    .add(complaint::Column::RecipientRole.eq(role))
                    .add(complaint::Column::ComplaintAgainstId.eq(user_id)),
            )
            .order_by_desc(complaint::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Complaints filed by one user, with an optional inclusive
    /// creation-date range. Used by the export surface.
    pub async fn find_by_complainant(
        &self,
        complainant_id: i32,
        date_range: Option<(chrono::NaiveDate, chrono::NaiveDate)>,
    ) -> AppResult<Vec<complaint::Model>> {
        let mut condition =
            Condition::all().add(complaint::Column::ComplainantId.eq(complainant_id));

        if let Some((start, end)) = date_range {
            condition = condition.add(complaint::Column::CreatedAt.between(
                start.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
                end.and_hms_opt(23, 59, 59).unwrap_or_default().and_utc(),
            ));
        }

        Complaint::find()
            .filter(condition)
            .order_by_desc(complaint::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Every complaint, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<complaint::Model>> {
        Complaint::find()
            .order_by_desc(complaint::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

//! Complaint entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::user::Role;

/// Lifecycle status of a complaint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    /// Awaiting a response from the recipient role or the target.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// A response was recorded; terminal.
    #[sea_orm(string_value = "resolved")]
    Resolved,
}

impl ComplaintStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub complainant_id: i32,

    pub complaint_against_id: i32,

    /// Optional link to the report the complaint concerns.
    #[sea_orm(nullable)]
    pub report_id: Option<i32>,

    #[sea_orm(column_type = "Text")]
    pub complaint_text: String,

    pub status: ComplaintStatus,

    /// Role responsible for responding, assigned once at creation
    /// from the escalation hierarchy.
    pub recipient_role: Role,

    #[sea_orm(column_type = "Text", nullable)]
    pub response_text: Option<String>,

    #[sea_orm(nullable)]
    pub responded_by: Option<i32>,

    #[sea_orm(nullable)]
    pub responded_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ComplainantId",
        to = "super::user::Column::Id"
    )]
    Complainant,

    #[sea_orm(
        belongs_to = "super::report::Entity",
        from = "Column::ReportId",
        to = "super::report::Column::Id"
    )]
    Report,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

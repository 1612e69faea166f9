//! Rating entity.
//!
//! A rating targets exactly one of a report or a lecturer. Uniqueness per
//! (rater, target) is enforced by partial unique indexes rather than an
//! application-level existence check, so concurrent duplicate submissions
//! surface as constraint violations.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Set when the rating targets a report.
    #[sea_orm(nullable)]
    pub report_id: Option<i32>,

    /// Set when the rating targets a lecturer.
    #[sea_orm(nullable)]
    pub lecturer_id: Option<i32>,

    pub student_id: i32,

    /// Score in [1, 5].
    pub rating: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::report::Entity",
        from = "Column::ReportId",
        to = "super::report::Column::Id"
    )]
    Report,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Rater,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

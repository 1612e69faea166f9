//! Lecture report entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a report.
///
/// Advances pending → signed → reviewed, never backward.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Created by the lecturer, awaiting class representative signature.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Confirmed by a class representative.
    #[sea_orm(string_value = "signed")]
    Signed,
    /// Terminal state, reached during faculty review.
    #[sea_orm(string_value = "reviewed")]
    Reviewed,
}

impl ReportStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Signed => "signed",
            Self::Reviewed => "reviewed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub faculty_id: i32,

    pub class_id: i32,

    pub course_id: i32,

    pub lecturer_id: i32,

    pub week_number: i32,

    pub date_of_lecture: Date,

    pub students_present: i32,

    pub venue: String,

    /// Free-form slot description, e.g. "08:00 - 10:00".
    pub scheduled_time: String,

    #[sea_orm(column_type = "Text")]
    pub topic_taught: String,

    #[sea_orm(column_type = "Text")]
    pub learning_outcomes: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub recommendations: Option<String>,

    pub status: ReportStatus,

    /// Signature blob attached by the class representative.
    #[sea_orm(column_type = "Text", nullable)]
    pub student_signature: Option<String>,

    #[sea_orm(nullable)]
    pub signed_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::LecturerId",
        to = "super::user::Column::Id"
    )]
    Lecturer,

    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,

    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::faculty::Entity",
        from = "Column::FacultyId",
        to = "super::faculty::Column::Id"
    )]
    Faculty,

    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecturer.def()
    }
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn lecturer_relation_joins_on_lecturer_id() {
        let sql = Entity::find()
            .find_also_related(user::Entity)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("\"reports\".\"lecturer_id\" = \"users\".\"id\""));
    }
}

//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role a user holds within the faculty.
///
/// Roles are fixed at registration. Every piece of role-based branching in
/// the system matches exhaustively on this enum, so adding a role forces the
/// routing and visibility logic to be revisited.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A student; signs reports when flagged as class representative.
    #[sea_orm(string_value = "student")]
    Student,
    /// A lecturer; files lecture reports.
    #[sea_orm(string_value = "lecturer")]
    Lecturer,
    /// Principal Representative Lecturer, first-line complaint recipient.
    #[sea_orm(string_value = "prl")]
    Prl,
    /// Program Leader, manages course assignments within a faculty.
    #[sea_orm(string_value = "pl")]
    Pl,
    /// Faculty Management, top of the escalation hierarchy.
    #[sea_orm(string_value = "fmg")]
    Fmg,
}

impl Role {
    /// Staff roles, in descending hierarchy order.
    pub const STAFF: [Self; 4] = [Self::Fmg, Self::Pl, Self::Prl, Self::Lecturer];

    /// Whether this role is a staff role (anything but student).
    #[must_use]
    pub const fn is_staff(self) -> bool {
        !matches!(self, Self::Student)
    }

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Lecturer => "lecturer",
            Self::Prl => "prl",
            Self::Pl => "pl",
            Self::Fmg => "fmg",
        }
    }

    /// Human-readable position title for staff directories.
    #[must_use]
    pub const fn position_title(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Lecturer => "Lecturer",
            Self::Prl => "Program Representative Lecturer",
            Self::Pl => "Program Leader",
            Self::Fmg => "Faculty Management",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "lecturer" => Some(Self::Lecturer),
            "prl" => Some(Self::Prl),
            "pl" => Some(Self::Pl),
            "fmg" => Some(Self::Fmg),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 password hash. Never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub name: String,

    pub role: Role,

    pub faculty_id: i32,

    /// Students flagged as class representative may sign reports
    /// for their own class.
    #[sea_orm(default_value = false)]
    pub is_class_rep: bool,

    /// Only meaningful for students.
    #[sea_orm(nullable)]
    pub class_id: Option<i32>,

    /// Public path of the uploaded profile image.
    #[sea_orm(nullable)]
    pub profile_image: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::faculty::Entity",
        from = "Column::FacultyId",
        to = "super::faculty::Column::Id"
    )]
    Faculty,

    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,

    #[sea_orm(has_many = "super::report::Entity")]
    Reports,
}

impl Related<super::faculty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faculty.def()
    }
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_wire_names() {
        for role in [Role::Student, Role::Lecturer, Role::Prl, Role::Pl, Role::Fmg] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("dean"), None);
    }

    #[test]
    fn only_student_is_not_staff() {
        assert!(!Role::Student.is_staff());
        for role in Role::STAFF {
            assert!(role.is_staff());
        }
    }
}

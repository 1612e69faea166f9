//! Create assignments table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assignment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignment::LecturerId).integer().not_null())
                    .col(ColumnDef::new(Assignment::CourseId).integer().not_null())
                    .col(ColumnDef::new(Assignment::ClassId).integer().not_null())
                    .col(ColumnDef::new(Assignment::AssignedBy).integer().not_null())
                    .col(
                        ColumnDef::new(Assignment::AssignedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_lecturer")
                            .from(Assignment::Table, Assignment::LecturerId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_course")
                            .from(Assignment::Table, Assignment::CourseId)
                            .to(Course::Table, Course::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_class")
                            .from(Assignment::Table, Assignment::ClassId)
                            .to(Class::Table, Class::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_assigned_by")
                            .from(Assignment::Table, Assignment::AssignedBy)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignment_lecturer_id")
                    .table(Assignment::Table)
                    .col(Assignment::LecturerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assignment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Assignment {
    #[iden = "assignments"]
    Table,
    Id,
    LecturerId,
    CourseId,
    ClassId,
    AssignedBy,
    AssignedAt,
}

#[derive(Iden)]
enum User {
    #[iden = "users"]
    Table,
    Id,
}

#[derive(Iden)]
enum Course {
    #[iden = "courses"]
    Table,
    Id,
}

#[derive(Iden)]
enum Class {
    #[iden = "classes"]
    Table,
    Id,
}

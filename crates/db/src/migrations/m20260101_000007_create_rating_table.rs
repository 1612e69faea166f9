//! Create ratings table migration.
//!
//! Duplicate prevention lives here: one rating per (rater, report) and per
//! (rater, lecturer), enforced by unique indexes so concurrent submissions
//! cannot race past an application-level check.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rating::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rating::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rating::ReportId).integer())
                    .col(ColumnDef::new(Rating::LecturerId).integer())
                    .col(ColumnDef::new(Rating::StudentId).integer().not_null())
                    .col(ColumnDef::new(Rating::Rating).integer().not_null())
                    .col(ColumnDef::new(Rating::Comment).text())
                    .col(
                        ColumnDef::new(Rating::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rating_report")
                            .from(Rating::Table, Rating::ReportId)
                            .to(Report::Table, Report::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rating_lecturer")
                            .from(Rating::Table, Rating::LecturerId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rating_student")
                            .from(Rating::Table, Rating::StudentId)
                            .to(User::Table, User::Id),
                    )
                    .check(Expr::col(Rating::Rating).between(1, 5))
                    .to_owned(),
            )
            .await?;

        // NULLs are distinct, so each index only constrains its target kind
        manager
            .create_index(
                Index::create()
                    .name("idx_rating_student_report")
                    .table(Rating::Table)
                    .col(Rating::StudentId)
                    .col(Rating::ReportId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rating_student_lecturer")
                    .table(Rating::Table)
                    .col(Rating::StudentId)
                    .col(Rating::LecturerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rating::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Rating {
    #[iden = "ratings"]
    Table,
    Id,
    ReportId,
    LecturerId,
    StudentId,
    Rating,
    Comment,
    CreatedAt,
}

#[derive(Iden)]
enum Report {
    #[iden = "reports"]
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    #[iden = "users"]
    Table,
    Id,
}

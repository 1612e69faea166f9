//! Create reports table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Report::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Report::FacultyId).integer().not_null())
                    .col(ColumnDef::new(Report::ClassId).integer().not_null())
                    .col(ColumnDef::new(Report::CourseId).integer().not_null())
                    .col(ColumnDef::new(Report::LecturerId).integer().not_null())
                    .col(ColumnDef::new(Report::WeekNumber).integer().not_null())
                    .col(ColumnDef::new(Report::DateOfLecture).date().not_null())
                    .col(ColumnDef::new(Report::StudentsPresent).integer().not_null())
                    .col(ColumnDef::new(Report::Venue).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Report::ScheduledTime)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Report::TopicTaught).text().not_null())
                    .col(ColumnDef::new(Report::LearningOutcomes).text().not_null())
                    .col(ColumnDef::new(Report::Recommendations).text())
                    .col(
                        ColumnDef::new(Report::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Report::StudentSignature).text())
                    .col(ColumnDef::new(Report::SignedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Report::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_faculty")
                            .from(Report::Table, Report::FacultyId)
                            .to(Faculty::Table, Faculty::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_class")
                            .from(Report::Table, Report::ClassId)
                            .to(Class::Table, Class::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_course")
                            .from(Report::Table, Report::CourseId)
                            .to(Course::Table, Course::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_lecturer")
                            .from(Report::Table, Report::LecturerId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_report_lecturer_id")
                    .table(Report::Table)
                    .col(Report::LecturerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_report_faculty_id")
                    .table(Report::Table)
                    .col(Report::FacultyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_report_class_id")
                    .table(Report::Table)
                    .col(Report::ClassId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Report {
    #[iden = "reports"]
    Table,
    Id,
    FacultyId,
    ClassId,
    CourseId,
    LecturerId,
    WeekNumber,
    DateOfLecture,
    StudentsPresent,
    Venue,
    ScheduledTime,
    TopicTaught,
    LearningOutcomes,
    Recommendations,
    Status,
    StudentSignature,
    SignedAt,
    CreatedAt,
}

#[derive(Iden)]
enum Faculty {
    #[iden = "faculties"]
    Table,
    Id,
}

#[derive(Iden)]
enum Class {
    #[iden = "classes"]
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
enum User {
    #[iden = "users"]
    Table,
    Id,
}

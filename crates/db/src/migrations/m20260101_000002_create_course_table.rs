//! Create courses table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Course::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Course::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Course::Code).string_len(32).not_null())
                    .col(ColumnDef::new(Course::FacultyId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_faculty")
                            .from(Course::Table, Course::FacultyId)
                            .to(Faculty::Table, Faculty::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_code")
                    .table(Course::Table)
                    .col(Course::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_faculty_id")
                    .table(Course::Table)
                    .col(Course::FacultyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Course {
    #[iden = "courses"]
    Table,
    Id,
    Name,
    Code,
    FacultyId,
}

#[derive(Iden)]
enum Faculty {
    #[iden = "faculties"]
    Table,
    Id,
}

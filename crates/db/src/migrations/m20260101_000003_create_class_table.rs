//! Create classes table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Class::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Class::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Class::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Class::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(Class::TotalStudents)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_class_course")
                            .from(Class::Table, Class::CourseId)
                            .to(Course::Table, Course::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_class_course_id")
                    .table(Class::Table)
                    .col(Class::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Class::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Class {
    #[iden = "classes"]
    Table,
    Id,
    Name,
    CourseId,
    TotalStudents,
}

#[derive(Iden)]
enum Course {
    #[iden = "courses"]
    Table,
    Id,
}

//! Create users table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::Email).string_len(256).not_null())
                    .col(ColumnDef::new(User::PasswordHash).text().not_null())
                    .col(ColumnDef::new(User::Name).string_len(256).not_null())
                    .col(ColumnDef::new(User::Role).string_len(16).not_null())
                    .col(ColumnDef::new(User::FacultyId).integer().not_null())
                    .col(
                        ColumnDef::new(User::IsClassRep)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(User::ClassId).integer())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_faculty")
                            .from(User::Table, User::FacultyId)
                            .to(Faculty::Table, Faculty::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_class")
                            .from(User::Table, User::ClassId)
                            .to(Class::Table, Class::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Duplicate registrations surface as unique violations, not pre-checks
        manager
            .create_index(
                Index::create()
                    .name("idx_user_email")
                    .table(User::Table)
                    .col(User::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_faculty_role")
                    .table(User::Table)
                    .col(User::FacultyId)
                    .col(User::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum User {
    #[iden = "users"]
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    Role,
    FacultyId,
    IsClassRep,
    ClassId,
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

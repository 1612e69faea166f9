//! Create complaints table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Complaint::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Complaint::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Complaint::ComplainantId).integer().not_null())
                    .col(
                        ColumnDef::new(Complaint::ComplaintAgainstId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Complaint::ReportId).integer())
                    .col(ColumnDef::new(Complaint::ComplaintText).text().not_null())
                    .col(
                        ColumnDef::new(Complaint::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Complaint::RecipientRole)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Complaint::ResponseText).text())
                    .col(ColumnDef::new(Complaint::RespondedBy).integer())
                    .col(ColumnDef::new(Complaint::RespondedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Complaint::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_complainant")
                            .from(Complaint::Table, Complaint::ComplainantId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_against")
                            .from(Complaint::Table, Complaint::ComplaintAgainstId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_report")
                            .from(Complaint::Table, Complaint::ReportId)
                            .to(Report::Table, Report::Id),
                    )
                    .check(
                        Expr::col(Complaint::ComplainantId)
                            .ne(Expr::col(Complaint::ComplaintAgainstId)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_complaint_recipient_role")
                    .table(Complaint::Table)
                    .col(Complaint::RecipientRole)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_complaint_complainant_id")
                    .table(Complaint::Table)
                    .col(Complaint::ComplainantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaint::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Complaint {
    #[iden = "complaints"]
    Table,
    Id,
    ComplainantId,
    ComplaintAgainstId,
    ReportId,
    ComplaintText,
    Status,
    RecipientRole,
    ResponseText,
    RespondedBy,
    RespondedAt,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    #[iden = "users"]
    Table,
    Id,
}

#[derive(Iden)]
enum Report {
    #[iden = "reports"]
    Table,
    Id,
}

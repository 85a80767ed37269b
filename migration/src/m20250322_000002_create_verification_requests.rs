use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum VerificationRequests {
    Table,
    Id,
    UserId,
    FullName,
    Organization,
    Reason,
    Documents,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerificationRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VerificationRequests::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::UserId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::FullName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VerificationRequests::Organization).string().null())
                    .col(ColumnDef::new(VerificationRequests::Reason).text().not_null())
                    .col(ColumnDef::new(VerificationRequests::Documents).text().not_null())
                    .col(
                        ColumnDef::new(VerificationRequests::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_verification_requests_user")
                    .table(VerificationRequests::Table)
                    .col(VerificationRequests::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VerificationRequests::Table).to_owned())
            .await?;
        Ok(())
    }
}

use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Contests {
    Table,
    Id,
    Title,
    Description,
    StartDate,
    EndDate,
    Status,
    CreatedBy,
    CoverImage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContestArtworks {
    Table,
    ContestId,
    ArtworkId,
    AverageRating,
    SubmittedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contests::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contests::Title).string().not_null())
                    .col(ColumnDef::new(Contests::Description).text().null())
                    .col(
                        ColumnDef::new(Contests::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contests::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contests::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Contests::CreatedBy).string_len(36).not_null())
                    .col(ColumnDef::new(Contests::CoverImage).string().null())
                    .col(
                        ColumnDef::new(Contests::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Contests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContestArtworks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContestArtworks::ContestId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContestArtworks::ArtworkId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContestArtworks::AverageRating).double().null())
                    .col(
                        ColumnDef::new(ContestArtworks::SubmittedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ContestArtworks::ContestId)
                            .col(ContestArtworks::ArtworkId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_contest_artworks_artwork")
                    .table(ContestArtworks::Table)
                    .col(ContestArtworks::ArtworkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContestArtworks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contests::Table).to_owned())
            .await?;
        Ok(())
    }
}

use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    Id,
    ArtistId,
    Name,
    Description,
    CoverImage,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PortfolioArtworks {
    Table,
    PortfolioId,
    ArtworkId,
    Position,
    AddedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Portfolios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Portfolios::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Portfolios::ArtistId).string_len(36).not_null())
                    .col(ColumnDef::new(Portfolios::Name).string().not_null())
                    .col(ColumnDef::new(Portfolios::Description).text().null())
                    .col(ColumnDef::new(Portfolios::CoverImage).string().null())
                    .col(
                        ColumnDef::new(Portfolios::IsPublic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Portfolios::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Portfolios::UpdatedAt)
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
                    .name("ix_portfolios_artist")
                    .table(Portfolios::Table)
                    .col(Portfolios::ArtistId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PortfolioArtworks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioArtworks::PortfolioId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioArtworks::ArtworkId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioArtworks::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PortfolioArtworks::AddedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PortfolioArtworks::PortfolioId)
                            .col(PortfolioArtworks::ArtworkId),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortfolioArtworks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Portfolios::Table).to_owned())
            .await?;
        Ok(())
    }
}

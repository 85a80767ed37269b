use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Artworks {
    Table,
    Id,
    Title,
    Description,
    YearCreated,
    Medium,
    Style,
    Subject,
    Dimensions,
    DominantColor,
    Price,
    Currency,
    IsForSale,
    ExternalSaleLink,
    OwnerId,
    OwnerType,
    ArtistId,
    Images,
    Tags,
    Location,
    Material,
    IsPublished,
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
                    .table(Artworks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artworks::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Artworks::Title).string().not_null())
                    .col(ColumnDef::new(Artworks::Description).text().null())
                    .col(ColumnDef::new(Artworks::YearCreated).integer().null())
                    .col(ColumnDef::new(Artworks::Medium).string().null())
                    .col(ColumnDef::new(Artworks::Style).string().null())
                    .col(ColumnDef::new(Artworks::Subject).string().null())
                    .col(ColumnDef::new(Artworks::Dimensions).string().null())
                    .col(ColumnDef::new(Artworks::DominantColor).string().null())
                    .col(ColumnDef::new(Artworks::Price).big_integer().null())
                    .col(ColumnDef::new(Artworks::Currency).string_len(8).null())
                    .col(
                        ColumnDef::new(Artworks::IsForSale)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Artworks::ExternalSaleLink).string().null())
                    .col(ColumnDef::new(Artworks::OwnerId).string_len(36).not_null())
                    .col(ColumnDef::new(Artworks::OwnerType).string_len(16).not_null())
                    .col(ColumnDef::new(Artworks::ArtistId).string_len(36).null())
                    .col(ColumnDef::new(Artworks::Images).text().null())
                    .col(ColumnDef::new(Artworks::Tags).text().null())
                    .col(ColumnDef::new(Artworks::Location).string().null())
                    .col(ColumnDef::new(Artworks::Material).string().null())
                    .col(
                        ColumnDef::new(Artworks::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Artworks::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Artworks::UpdatedAt)
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
                    .name("ix_artworks_owner")
                    .table(Artworks::Table)
                    .col(Artworks::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_artworks_artist")
                    .table(Artworks::Table)
                    .col(Artworks::ArtistId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artworks::Table).to_owned())
            .await?;
        Ok(())
    }
}

use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum ArtworkRatings {
    Table,
    Id,
    ArtworkId,
    UserId,
    Rating,
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
                    .table(ArtworkRatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArtworkRatings::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ArtworkRatings::ArtworkId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ArtworkRatings::UserId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ArtworkRatings::Rating).double().not_null())
                    .col(
                        ColumnDef::new(ArtworkRatings::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ArtworkRatings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // one rating per (artwork, user); submit_rating upserts through this
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_artwork_ratings_artwork_user")
                    .table(ArtworkRatings::Table)
                    .col(ArtworkRatings::ArtworkId)
                    .col(ArtworkRatings::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArtworkRatings::Table).to_owned())
            .await?;
        Ok(())
    }
}

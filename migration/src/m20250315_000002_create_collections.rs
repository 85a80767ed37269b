use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Collections {
    Table,
    Id,
    UserId,
    Name,
    Description,
    CoverImage,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CollectionArtworks {
    Table,
    CollectionId,
    ArtworkId,
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
                    .table(Collections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Collections::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Collections::UserId).string_len(36).not_null())
                    .col(ColumnDef::new(Collections::Name).string().not_null())
                    .col(ColumnDef::new(Collections::Description).text().null())
                    .col(ColumnDef::new(Collections::CoverImage).string().null())
                    .col(
                        ColumnDef::new(Collections::IsPublic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Collections::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Collections::UpdatedAt)
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
                    .name("ix_collections_user")
                    .table(Collections::Table)
                    .col(Collections::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CollectionArtworks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CollectionArtworks::CollectionId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionArtworks::ArtworkId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionArtworks::AddedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CollectionArtworks::CollectionId)
                            .col(CollectionArtworks::ArtworkId),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CollectionArtworks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Collections::Table).to_owned())
            .await?;
        Ok(())
    }
}

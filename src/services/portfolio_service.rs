use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{
    artwork_entity, portfolio_artwork_entity, portfolio_entity, portfolios, user_entity, users,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AddPortfolioArtworkRequest, ArtworkResponse, CreatePortfolioRequest, PortfolioResponse,
    UpdatePortfolioRequest,
};

#[derive(Clone)]
pub struct PortfolioService {
    pool: Arc<DatabaseConnection>,
}

impl PortfolioService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    /// Portfolios are an artist feature; lover accounts curate through
    /// collections instead.
    pub async fn create_portfolio(
        &self,
        artist_id: &str,
        req: CreatePortfolioRequest,
    ) -> AppResult<PortfolioResponse> {
        if req.name.trim().is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }

        let artist = user_entity::Entity::find_by_id(artist_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        if artist.user_type == users::UserType::Lover {
            return Err(AppError::Forbidden(
                "Art lover accounts cannot create portfolios".to_string(),
            ));
        }

        let now = Utc::now();
        let portfolio = portfolios::Model {
            id: Uuid::new_v4().to_string(),
            artist_id: artist_id.to_string(),
            name: req.name.trim().to_string(),
            description: req.description,
            cover_image: req.cover_image,
            is_public: req.is_public,
            created_at: Some(now),
            updated_at: Some(now),
        };

        portfolio_entity::Entity::insert(portfolio.clone().into_active_model())
            .exec_without_returning(self.pool.as_ref())
            .await?;

        Ok(PortfolioResponse::from(portfolio))
    }

    pub async fn update_portfolio(
        &self,
        portfolio_id: &str,
        artist_id: &str,
        req: UpdatePortfolioRequest,
    ) -> AppResult<PortfolioResponse> {
        let portfolio = self.find_owned(portfolio_id, artist_id).await?;

        let mut updated = portfolio.into_active_model();
        if let Some(name) = req.name {
            if name.trim().is_empty() {
                return Err(AppError::ValidationError("Name is required".to_string()));
            }
            updated.name = Set(name.trim().to_string());
        }
        if let Some(description) = req.description {
            updated.description = Set(Some(description));
        }
        if let Some(cover_image) = req.cover_image {
            updated.cover_image = Set(Some(cover_image));
        }
        if let Some(is_public) = req.is_public {
            updated.is_public = Set(is_public);
        }
        updated.updated_at = Set(Some(Utc::now()));

        let saved = portfolio_entity::Entity::update(updated)
            .exec(self.pool.as_ref())
            .await?;
        Ok(PortfolioResponse::from(saved))
    }

    pub async fn list_portfolios(
        &self,
        artist_id: &str,
        viewer_id: Option<&str>,
    ) -> AppResult<Vec<PortfolioResponse>> {
        let mut finder = portfolio_entity::Entity::find()
            .filter(portfolio_entity::Column::ArtistId.eq(artist_id));
        if viewer_id != Some(artist_id) {
            finder = finder.filter(portfolio_entity::Column::IsPublic.eq(true));
        }

        let rows = finder
            .order_by_desc(portfolio_entity::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;

        let mut responses = Vec::with_capacity(rows.len());
        for portfolio in rows {
            let count = portfolio_artwork_entity::Entity::find()
                .filter(portfolio_artwork_entity::Column::PortfolioId.eq(portfolio.id.as_str()))
                .count(self.pool.as_ref())
                .await?;
            let mut response = PortfolioResponse::from(portfolio);
            response.artwork_count = count as i64;
            responses.push(response);
        }

        Ok(responses)
    }

    /// Portfolio pieces in their curated order.
    pub async fn get_portfolio_artworks(
        &self,
        portfolio_id: &str,
        viewer_id: Option<&str>,
    ) -> AppResult<Vec<ArtworkResponse>> {
        let portfolio = self.find_portfolio(portfolio_id).await?;
        if !portfolio.is_public && viewer_id != Some(portfolio.artist_id.as_str()) {
            return Err(AppError::Forbidden("Portfolio is private".to_string()));
        }

        let links = portfolio_artwork_entity::Entity::find()
            .filter(portfolio_artwork_entity::Column::PortfolioId.eq(portfolio_id))
            .order_by_asc(portfolio_artwork_entity::Column::Position)
            .all(self.pool.as_ref())
            .await?;

        let ids: Vec<String> = links.iter().map(|l| l.artwork_id.clone()).collect();
        let artworks = artwork_entity::Entity::find()
            .filter(artwork_entity::Column::Id.is_in(ids.clone()))
            .all(self.pool.as_ref())
            .await?;

        let data = ids
            .into_iter()
            .filter_map(|id| {
                artworks
                    .iter()
                    .find(|a| a.id == id)
                    .cloned()
                    .map(ArtworkResponse::from)
            })
            .collect();
        Ok(data)
    }

    pub async fn add_artwork(
        &self,
        portfolio_id: &str,
        artist_id: &str,
        req: AddPortfolioArtworkRequest,
    ) -> AppResult<()> {
        self.find_owned(portfolio_id, artist_id).await?;

        let artwork = artwork_entity::Entity::find_by_id(&req.artwork_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Artwork not found".to_string()))?;
        if artwork.owner_id != artist_id && artwork.artist_id.as_deref() != Some(artist_id) {
            return Err(AppError::Forbidden(
                "Portfolios can only hold your own artworks".to_string(),
            ));
        }

        let position = match req.position {
            Some(position) => position,
            None => {
                let count = portfolio_artwork_entity::Entity::find()
                    .filter(portfolio_artwork_entity::Column::PortfolioId.eq(portfolio_id))
                    .count(self.pool.as_ref())
                    .await?;
                count as i32
            }
        };

        let row = portfolio_artwork_entity::ActiveModel {
            portfolio_id: Set(portfolio_id.to_string()),
            artwork_id: Set(req.artwork_id),
            position: Set(position),
            added_at: Set(Some(Utc::now())),
        };
        portfolio_artwork_entity::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    portfolio_artwork_entity::Column::PortfolioId,
                    portfolio_artwork_entity::Column::ArtworkId,
                ])
                .update_column(portfolio_artwork_entity::Column::Position)
                .to_owned(),
            )
            .exec_without_returning(self.pool.as_ref())
            .await?;
        Ok(())
    }

    pub async fn remove_artwork(
        &self,
        portfolio_id: &str,
        artist_id: &str,
        artwork_id: &str,
    ) -> AppResult<()> {
        self.find_owned(portfolio_id, artist_id).await?;

        portfolio_artwork_entity::Entity::delete_many()
            .filter(portfolio_artwork_entity::Column::PortfolioId.eq(portfolio_id))
            .filter(portfolio_artwork_entity::Column::ArtworkId.eq(artwork_id))
            .exec(self.pool.as_ref())
            .await?;
        Ok(())
    }

    pub async fn delete_portfolio(&self, portfolio_id: &str, artist_id: &str) -> AppResult<()> {
        self.find_owned(portfolio_id, artist_id).await?;

        portfolio_artwork_entity::Entity::delete_many()
            .filter(portfolio_artwork_entity::Column::PortfolioId.eq(portfolio_id))
            .exec(self.pool.as_ref())
            .await?;
        portfolio_entity::Entity::delete_by_id(portfolio_id)
            .exec(self.pool.as_ref())
            .await?;
        Ok(())
    }

    async fn find_portfolio(&self, portfolio_id: &str) -> AppResult<portfolios::Model> {
        portfolio_entity::Entity::find_by_id(portfolio_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))
    }

    async fn find_owned(&self, portfolio_id: &str, artist_id: &str) -> AppResult<portfolios::Model> {
        let portfolio = self.find_portfolio(portfolio_id).await?;
        if portfolio.artist_id != artist_id {
            return Err(AppError::Forbidden(
                "Only the owner can modify a portfolio".to_string(),
            ));
        }
        Ok(portfolio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn lover_fixture() -> users::Model {
        users::Model {
            id: "lover-1".to_string(),
            email: "lover@example.com".to_string(),
            password_hash: None,
            username: "lover".to_string(),
            first_name: None,
            last_name: None,
            profile_image: None,
            bio: None,
            location: None,
            website: None,
            social_media_links: None,
            user_type: users::UserType::Lover,
            oauth_provider: None,
            oauth_id: None,
            is_verified: false,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_create_portfolio_rejects_lover_accounts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lover_fixture()]])
            .into_connection();

        let err = PortfolioService::new(db)
            .create_portfolio(
                "lover-1",
                CreatePortfolioRequest {
                    name: "Abstract Works".to_string(),
                    description: None,
                    cover_image: None,
                    is_public: true,
                },
            )
            .await;

        assert!(matches!(err, Err(AppError::Forbidden(_))));
    }
}

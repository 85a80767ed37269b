use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{
    artwork_entity, artwork_like_entity, artworks, comment_entity, user_entity, users,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ArtworkDetailResponse, ArtworkQuery, ArtworkResponse, CreateArtworkRequest, LikeResponse,
    PaginatedResponse, PaginationParams,
};

use super::increment_counter;

#[derive(Clone)]
pub struct ArtworkService {
    pool: Arc<DatabaseConnection>,
}

fn owner_type_for(user_type: users::UserType) -> AppResult<artworks::OwnerType> {
    match user_type {
        users::UserType::Artist => Ok(artworks::OwnerType::Artist),
        users::UserType::Gallery => Ok(artworks::OwnerType::Gallery),
        users::UserType::Fair => Ok(artworks::OwnerType::Fair),
        users::UserType::Lover => Err(AppError::Forbidden(
            "Art lover accounts cannot upload artworks".to_string(),
        )),
    }
}

fn to_json_list(items: Option<Vec<String>>) -> AppResult<Option<String>> {
    match items {
        Some(items) => Ok(Some(serde_json::to_string(&items)?)),
        None => Ok(None),
    }
}

impl ArtworkService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn create_artwork(
        &self,
        owner_id: &str,
        req: CreateArtworkRequest,
    ) -> AppResult<ArtworkResponse> {
        if req.title.trim().is_empty() {
            return Err(AppError::ValidationError("Title is required".to_string()));
        }

        let owner = user_entity::Entity::find_by_id(owner_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let owner_type = owner_type_for(owner.user_type)?;

        // Artists attribute their own uploads
        let artist_id = match owner_type {
            artworks::OwnerType::Artist => Some(owner.id.clone()),
            _ => req.artist_id.clone(),
        };

        let now = Utc::now();
        let artwork = artworks::Model {
            id: Uuid::new_v4().to_string(),
            title: req.title,
            description: req.description,
            year_created: req.year_created,
            medium: req.medium,
            style: req.style,
            subject: req.subject,
            dimensions: req.dimensions,
            dominant_color: req.dominant_color,
            price: req.price,
            currency: req.currency,
            is_for_sale: req.is_for_sale,
            external_sale_link: req.external_sale_link,
            owner_id: owner.id,
            owner_type,
            artist_id,
            images: to_json_list(req.images)?,
            tags: to_json_list(req.tags)?,
            location: req.location,
            material: req.material,
            is_published: req.is_published,
            created_at: Some(now),
            updated_at: Some(now),
        };

        artwork_entity::Entity::insert(artwork.clone().into_active_model())
            .exec_without_returning(self.pool.as_ref())
            .await?;
        increment_counter(self.pool.as_ref(), "total_artworks").await?;

        Ok(ArtworkResponse::from(artwork))
    }

    /// Detail view with engagement counts and, when a viewer is signed
    /// in, their own like/rating state.
    pub async fn get_artwork(
        &self,
        artwork_id: &str,
        viewer_id: Option<&str>,
    ) -> AppResult<ArtworkDetailResponse> {
        let artwork = self.find_artwork(artwork_id).await?;

        let likes = artwork_like_entity::Entity::find()
            .filter(artwork_like_entity::Column::ArtworkId.eq(artwork_id))
            .count(self.pool.as_ref())
            .await?;
        let comments = comment_entity::Entity::find()
            .filter(comment_entity::Column::ArtworkId.eq(artwork_id))
            .count(self.pool.as_ref())
            .await?;

        let mut is_liked = false;
        let mut your_rating = None;
        if let Some(viewer_id) = viewer_id {
            is_liked = artwork_like_entity::Entity::find_by_id((
                artwork_id.to_string(),
                viewer_id.to_string(),
            ))
            .one(self.pool.as_ref())
            .await?
            .is_some();

            your_rating = crate::entities::artwork_rating_entity::Entity::find()
                .filter(crate::entities::artwork_rating_entity::Column::ArtworkId.eq(artwork_id))
                .filter(crate::entities::artwork_rating_entity::Column::UserId.eq(viewer_id))
                .one(self.pool.as_ref())
                .await?
                .map(|r| r.rating);
        }

        let artist_name = match artwork.artist_id.as_deref() {
            Some(artist_id) => user_entity::Entity::find_by_id(artist_id)
                .one(self.pool.as_ref())
                .await?
                .map(|u| u.username),
            None => None,
        };

        let mut response = ArtworkResponse::from(artwork);
        response.likes = likes as i64;
        response.comments = comments as i64;
        response.artist_name = artist_name;

        Ok(ArtworkDetailResponse {
            artwork: response,
            is_liked,
            your_rating,
        })
    }

    pub async fn search(&self, query: ArtworkQuery) -> AppResult<PaginatedResponse<ArtworkResponse>> {
        let mut condition = Condition::all().add(artwork_entity::Column::IsPublished.eq(true));

        if let Some(keyword) = query.keyword.as_deref() {
            if !keyword.is_empty() {
                condition = condition.add(
                    Condition::any()
                        .add(artwork_entity::Column::Title.contains(keyword))
                        .add(artwork_entity::Column::Description.contains(keyword))
                        .add(artwork_entity::Column::Tags.contains(keyword)),
                );
            }
        }
        if let Some(artist_id) = query.artist_id.as_deref() {
            condition = condition.add(artwork_entity::Column::ArtistId.eq(artist_id));
        }
        if let Some(style) = query.style.as_deref() {
            condition = condition.add(artwork_entity::Column::Style.eq(style));
        }
        if let Some(medium) = query.medium.as_deref() {
            condition = condition.add(artwork_entity::Column::Medium.eq(medium));
        }
        if let Some(min) = query.price_min {
            condition = condition.add(artwork_entity::Column::Price.gte(min));
        }
        if let Some(max) = query.price_max {
            condition = condition.add(artwork_entity::Column::Price.lte(max));
        }
        if let Some(min) = query.year_min {
            condition = condition.add(artwork_entity::Column::YearCreated.gte(min));
        }
        if let Some(max) = query.year_max {
            condition = condition.add(artwork_entity::Column::YearCreated.lte(max));
        }
        if let Some(color) = query.dominant_color.as_deref() {
            condition = condition.add(artwork_entity::Column::DominantColor.eq(color));
        }
        if let Some(subject) = query.subject.as_deref() {
            condition = condition.add(artwork_entity::Column::Subject.eq(subject));
        }
        if let Some(location) = query.location.as_deref() {
            condition = condition.add(artwork_entity::Column::Location.contains(location));
        }
        if let Some(material) = query.material.as_deref() {
            condition = condition.add(artwork_entity::Column::Material.eq(material));
        }

        let pagination = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let total = artwork_entity::Entity::find()
            .filter(condition.clone())
            .count(self.pool.as_ref())
            .await?;

        let rows = artwork_entity::Entity::find()
            .filter(condition)
            .order_by_desc(artwork_entity::Column::CreatedAt)
            .offset(pagination.get_offset() as u64)
            .limit(pagination.get_limit() as u64)
            .all(self.pool.as_ref())
            .await?;

        let data = rows.into_iter().map(ArtworkResponse::from).collect();
        Ok(PaginatedResponse::new(
            data,
            pagination.page.unwrap_or(1).max(1),
            pagination.get_limit(),
            total as i64,
        ))
    }

    /// Idempotent like toggle: liking twice or unliking an unliked
    /// artwork is a no-op.
    pub async fn set_like(
        &self,
        artwork_id: &str,
        user_id: &str,
        liked: bool,
    ) -> AppResult<LikeResponse> {
        self.find_artwork(artwork_id).await?;

        if liked {
            let row = artwork_like_entity::ActiveModel {
                artwork_id: Set(artwork_id.to_string()),
                user_id: Set(user_id.to_string()),
                created_at: Set(Some(Utc::now())),
            };
            artwork_like_entity::Entity::insert(row)
                .on_conflict(
                    OnConflict::columns([
                        artwork_like_entity::Column::ArtworkId,
                        artwork_like_entity::Column::UserId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(self.pool.as_ref())
                .await?;
        } else {
            artwork_like_entity::Entity::delete_many()
                .filter(artwork_like_entity::Column::ArtworkId.eq(artwork_id))
                .filter(artwork_like_entity::Column::UserId.eq(user_id))
                .exec(self.pool.as_ref())
                .await?;
        }

        let likes = artwork_like_entity::Entity::find()
            .filter(artwork_like_entity::Column::ArtworkId.eq(artwork_id))
            .count(self.pool.as_ref())
            .await?;

        Ok(LikeResponse {
            liked,
            likes: likes as i64,
        })
    }

    pub async fn delete_artwork(&self, artwork_id: &str, user_id: &str) -> AppResult<()> {
        let artwork = self.find_artwork(artwork_id).await?;
        if artwork.owner_id != user_id {
            return Err(AppError::Forbidden(
                "Only the owner can delete an artwork".to_string(),
            ));
        }

        artwork_entity::Entity::delete_by_id(artwork_id)
            .exec(self.pool.as_ref())
            .await?;
        Ok(())
    }

    async fn find_artwork(&self, artwork_id: &str) -> AppResult<artworks::Model> {
        artwork_entity::Entity::find_by_id(artwork_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Artwork not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn user_fixture(user_type: users::UserType) -> users::Model {
        users::Model {
            id: "owner-1".to_string(),
            email: "owner@example.com".to_string(),
            password_hash: None,
            username: "owner".to_string(),
            first_name: None,
            last_name: None,
            profile_image: None,
            bio: None,
            location: None,
            website: None,
            social_media_links: None,
            user_type,
            oauth_provider: None,
            oauth_id: None,
            is_verified: true,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    fn create_request() -> CreateArtworkRequest {
        CreateArtworkRequest {
            title: "Morning study".to_string(),
            description: None,
            year_created: Some(2025),
            medium: Some("Oil on Canvas".to_string()),
            style: None,
            subject: None,
            dimensions: None,
            dominant_color: None,
            price: None,
            currency: None,
            is_for_sale: false,
            external_sale_link: None,
            artist_id: None,
            images: Some(vec!["https://cdn.example.com/a.jpg".to_string()]),
            tags: Some(vec!["landscape".to_string()]),
            location: None,
            material: None,
            is_published: true,
        }
    }

    #[tokio::test]
    async fn test_create_artwork_attributes_artist() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_fixture(users::UserType::Artist)]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let resp = ArtworkService::new(db)
            .create_artwork("owner-1", create_request())
            .await
            .unwrap();

        assert_eq!(resp.artist_id.as_deref(), Some("owner-1"));
        assert_eq!(resp.images, vec!["https://cdn.example.com/a.jpg"]);
        assert_eq!(resp.tags, vec!["landscape"]);
    }

    #[tokio::test]
    async fn test_create_artwork_rejects_lover_accounts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_fixture(users::UserType::Lover)]])
            .into_connection();

        let err = ArtworkService::new(db)
            .create_artwork("owner-1", create_request())
            .await;

        assert!(matches!(err, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_artwork_requires_ownership() {
        let artwork = artworks::Model {
            id: "art-1".to_string(),
            title: "Morning study".to_string(),
            description: None,
            year_created: None,
            medium: None,
            style: None,
            subject: None,
            dimensions: None,
            dominant_color: None,
            price: None,
            currency: None,
            is_for_sale: false,
            external_sale_link: None,
            owner_id: "owner-1".to_string(),
            owner_type: artworks::OwnerType::Artist,
            artist_id: Some("owner-1".to_string()),
            images: None,
            tags: None,
            location: None,
            material: None,
            is_published: true,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![artwork]])
            .into_connection();

        let err = ArtworkService::new(db)
            .delete_artwork("art-1", "someone-else")
            .await;

        assert!(matches!(err, Err(AppError::Forbidden(_))));
    }
}

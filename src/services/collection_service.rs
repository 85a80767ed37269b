use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{
    artwork_entity, collection_artwork_entity, collection_entity, collections,
};
use crate::error::{AppError, AppResult};
use crate::models::{ArtworkResponse, CollectionResponse, CreateCollectionRequest};

#[derive(Clone)]
pub struct CollectionService {
    pool: Arc<DatabaseConnection>,
}

impl CollectionService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn create_collection(
        &self,
        user_id: &str,
        req: CreateCollectionRequest,
    ) -> AppResult<CollectionResponse> {
        if req.name.trim().is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }

        let now = Utc::now();
        let collection = collections::Model {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: req.name.trim().to_string(),
            description: req.description,
            cover_image: req.cover_image,
            is_public: req.is_public,
            created_at: Some(now),
            updated_at: Some(now),
        };

        collection_entity::Entity::insert(collection.clone().into_active_model())
            .exec_without_returning(self.pool.as_ref())
            .await?;

        Ok(CollectionResponse::from(collection))
    }

    /// A user's collections; private ones only show to their owner.
    pub async fn list_collections(
        &self,
        user_id: &str,
        viewer_id: Option<&str>,
    ) -> AppResult<Vec<CollectionResponse>> {
        let mut finder = collection_entity::Entity::find()
            .filter(collection_entity::Column::UserId.eq(user_id));
        if viewer_id != Some(user_id) {
            finder = finder.filter(collection_entity::Column::IsPublic.eq(true));
        }

        let rows = finder
            .order_by_desc(collection_entity::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;

        let mut responses = Vec::with_capacity(rows.len());
        for collection in rows {
            let count = collection_artwork_entity::Entity::find()
                .filter(collection_artwork_entity::Column::CollectionId.eq(collection.id.as_str()))
                .count(self.pool.as_ref())
                .await?;
            let mut response = CollectionResponse::from(collection);
            response.artwork_count = count as i64;
            responses.push(response);
        }

        Ok(responses)
    }

    pub async fn get_collection_artworks(
        &self,
        collection_id: &str,
        viewer_id: Option<&str>,
    ) -> AppResult<Vec<ArtworkResponse>> {
        let collection = self.find_collection(collection_id).await?;
        if !collection.is_public && viewer_id != Some(collection.user_id.as_str()) {
            return Err(AppError::Forbidden(
                "Collection is private".to_string(),
            ));
        }

        let links = collection_artwork_entity::Entity::find()
            .filter(collection_artwork_entity::Column::CollectionId.eq(collection_id))
            .order_by_desc(collection_artwork_entity::Column::AddedAt)
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

    /// Saving the same artwork twice is a no-op.
    pub async fn add_artwork(
        &self,
        collection_id: &str,
        user_id: &str,
        artwork_id: &str,
    ) -> AppResult<()> {
        let collection = self.find_collection(collection_id).await?;
        if collection.user_id != user_id {
            return Err(AppError::Forbidden(
                "Only the owner can modify a collection".to_string(),
            ));
        }

        let artwork = artwork_entity::Entity::find_by_id(artwork_id)
            .one(self.pool.as_ref())
            .await?;
        if artwork.is_none() {
            return Err(AppError::NotFound("Artwork not found".to_string()));
        }

        let row = collection_artwork_entity::ActiveModel {
            collection_id: Set(collection_id.to_string()),
            artwork_id: Set(artwork_id.to_string()),
            added_at: Set(Some(Utc::now())),
        };
        collection_artwork_entity::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    collection_artwork_entity::Column::CollectionId,
                    collection_artwork_entity::Column::ArtworkId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.pool.as_ref())
            .await?;
        Ok(())
    }

    pub async fn remove_artwork(
        &self,
        collection_id: &str,
        user_id: &str,
        artwork_id: &str,
    ) -> AppResult<()> {
        let collection = self.find_collection(collection_id).await?;
        if collection.user_id != user_id {
            return Err(AppError::Forbidden(
                "Only the owner can modify a collection".to_string(),
            ));
        }

        collection_artwork_entity::Entity::delete_many()
            .filter(collection_artwork_entity::Column::CollectionId.eq(collection_id))
            .filter(collection_artwork_entity::Column::ArtworkId.eq(artwork_id))
            .exec(self.pool.as_ref())
            .await?;
        Ok(())
    }

    pub async fn delete_collection(&self, collection_id: &str, user_id: &str) -> AppResult<()> {
        let collection = self.find_collection(collection_id).await?;
        if collection.user_id != user_id {
            return Err(AppError::Forbidden(
                "Only the owner can delete a collection".to_string(),
            ));
        }

        collection_artwork_entity::Entity::delete_many()
            .filter(collection_artwork_entity::Column::CollectionId.eq(collection_id))
            .exec(self.pool.as_ref())
            .await?;
        collection_entity::Entity::delete_by_id(collection_id)
            .exec(self.pool.as_ref())
            .await?;
        Ok(())
    }

    async fn find_collection(&self, collection_id: &str) -> AppResult<collections::Model> {
        collection_entity::Entity::find_by_id(collection_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn collection_fixture(is_public: bool) -> collections::Model {
        collections::Model {
            id: "coll-1".to_string(),
            user_id: "owner-1".to_string(),
            name: "Favorites".to_string(),
            description: None,
            cover_image: None,
            is_public,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_private_collection_hidden_from_others() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![collection_fixture(false)]])
            .into_connection();

        let err = CollectionService::new(db)
            .get_collection_artworks("coll-1", Some("viewer-1"))
            .await;

        assert!(matches!(err, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_add_artwork_requires_ownership() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![collection_fixture(true)]])
            .into_connection();

        let err = CollectionService::new(db)
            .add_artwork("coll-1", "someone-else", "art-1")
            .await;

        assert!(matches!(err, Err(AppError::Forbidden(_))));
    }
}

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    Set,
};

use crate::entities::{
    artwork_entity, collection_entity, counter_entity, follow_entity, user_entity, users,
};
use crate::error::{AppError, AppResult};
use crate::models::{PlatformStats, UpdateUserRequest, UserResponse, UserStatistics};
use crate::utils::{validate_username, validate_website};

#[derive(Clone)]
pub struct UserService {
    pool: Arc<DatabaseConnection>,
}

impl UserService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn get_user(&self, user_id: &str) -> AppResult<UserResponse> {
        let user = self.find_user(user_id).await?;
        Ok(UserResponse::from(user))
    }

    pub async fn get_user_statistics(&self, user_id: &str) -> AppResult<UserStatistics> {
        let total_artworks = artwork_entity::Entity::find()
            .filter(artwork_entity::Column::OwnerId.eq(user_id))
            .count(self.pool.as_ref())
            .await?;
        let followers = follow_entity::Entity::find()
            .filter(follow_entity::Column::FollowedId.eq(user_id))
            .count(self.pool.as_ref())
            .await?;
        let following = follow_entity::Entity::find()
            .filter(follow_entity::Column::FollowerId.eq(user_id))
            .count(self.pool.as_ref())
            .await?;
        let collections = collection_entity::Entity::find()
            .filter(collection_entity::Column::UserId.eq(user_id))
            .count(self.pool.as_ref())
            .await?;

        Ok(UserStatistics {
            total_artworks: total_artworks as i64,
            followers: followers as i64,
            following: following as i64,
            collections: collections as i64,
        })
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        req: UpdateUserRequest,
    ) -> AppResult<UserResponse> {
        if let Some(username) = req.username.as_deref() {
            validate_username(username)?;
        }
        if let Some(website) = req.website.as_deref() {
            validate_website(website)?;
        }

        let user = self.find_user(user_id).await?;

        let mut updated = user.into_active_model();
        if let Some(v) = req.username {
            updated.username = Set(v);
        }
        if let Some(v) = req.first_name {
            updated.first_name = Set(Some(v));
        }
        if let Some(v) = req.last_name {
            updated.last_name = Set(Some(v));
        }
        if let Some(v) = req.profile_image {
            updated.profile_image = Set(Some(v));
        }
        if let Some(v) = req.bio {
            updated.bio = Set(Some(v));
        }
        if let Some(v) = req.location {
            updated.location = Set(Some(v));
        }
        if let Some(v) = req.website {
            updated.website = Set(Some(v));
        }
        if let Some(v) = req.social_media_links {
            updated.social_media_links = Set(Some(v));
        }
        updated.updated_at = Set(Some(Utc::now()));

        let saved = user_entity::Entity::update(updated).exec(self.pool.as_ref()).await?;
        Ok(UserResponse::from(saved))
    }

    /// Platform totals from the seeded counters table.
    pub async fn get_platform_stats(&self) -> AppResult<PlatformStats> {
        let counters = counter_entity::Entity::find().all(self.pool.as_ref()).await?;

        let value = |name: &str| {
            counters
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.value)
                .unwrap_or(0)
        };

        Ok(PlatformStats {
            total_users: value("total_users"),
            total_artworks: value("total_artworks"),
            total_contests: value("total_contests"),
        })
    }

    async fn find_user(&self, user_id: &str) -> AppResult<users::Model> {
        user_entity::Entity::find_by_id(user_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::counters;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_get_user_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let err = UserService::new(db).get_user("missing").await;
        assert!(matches!(err, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_platform_stats_missing_counter_reads_zero() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                counters::Model {
                    name: "total_users".to_string(),
                    value: 41,
                },
                counters::Model {
                    name: "total_artworks".to_string(),
                    value: 7,
                },
            ]])
            .into_connection();

        let stats = UserService::new(db).get_platform_stats().await.unwrap();
        assert_eq!(stats.total_users, 41);
        assert_eq!(stats.total_artworks, 7);
        assert_eq!(stats.total_contests, 0);
    }
}

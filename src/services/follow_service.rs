use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{follow_entity, follows, user_entity};
use crate::error::{AppError, AppResult};
use crate::models::{
    FollowRequest, FollowResponse, PaginatedResponse, PaginationParams, UserSummary,
};

#[derive(Clone)]
pub struct FollowService {
    pool: Arc<DatabaseConnection>,
}

impl FollowService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    /// Follows an account, or updates the notification preference when
    /// already following.
    pub async fn follow(
        &self,
        follower_id: &str,
        followed_id: &str,
        req: FollowRequest,
    ) -> AppResult<FollowResponse> {
        if follower_id == followed_id {
            return Err(AppError::ValidationError(
                "Cannot follow yourself".to_string(),
            ));
        }

        let target = user_entity::Entity::find_by_id(followed_id)
            .one(self.pool.as_ref())
            .await?;
        if target.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let notifications_enabled = req.notifications_enabled.unwrap_or(true);
        let row = follows::ActiveModel {
            follower_id: Set(follower_id.to_string()),
            followed_id: Set(followed_id.to_string()),
            notifications_enabled: Set(notifications_enabled),
            created_at: Set(Some(Utc::now())),
        };
        follow_entity::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    follow_entity::Column::FollowerId,
                    follow_entity::Column::FollowedId,
                ])
                .update_column(follow_entity::Column::NotificationsEnabled)
                .to_owned(),
            )
            .exec_without_returning(self.pool.as_ref())
            .await?;

        let followers = self.count_followers(followed_id).await?;
        Ok(FollowResponse {
            following: true,
            followers,
            notifications_enabled: Some(notifications_enabled),
        })
    }

    pub async fn unfollow(&self, follower_id: &str, followed_id: &str) -> AppResult<FollowResponse> {
        follow_entity::Entity::delete_many()
            .filter(follow_entity::Column::FollowerId.eq(follower_id))
            .filter(follow_entity::Column::FollowedId.eq(followed_id))
            .exec(self.pool.as_ref())
            .await?;

        let followers = self.count_followers(followed_id).await?;
        Ok(FollowResponse {
            following: false,
            followers,
            notifications_enabled: None,
        })
    }

    pub async fn follow_state(
        &self,
        viewer_id: &str,
        followed_id: &str,
    ) -> AppResult<FollowResponse> {
        let edge = follow_entity::Entity::find_by_id((
            viewer_id.to_string(),
            followed_id.to_string(),
        ))
        .one(self.pool.as_ref())
        .await?;

        let followers = self.count_followers(followed_id).await?;
        Ok(FollowResponse {
            following: edge.is_some(),
            followers,
            notifications_enabled: edge.map(|e| e.notifications_enabled),
        })
    }

    pub async fn list_followers(
        &self,
        user_id: &str,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResponse<UserSummary>> {
        self.list_edge_users(user_id, true, pagination).await
    }

    pub async fn list_following(
        &self,
        user_id: &str,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResponse<UserSummary>> {
        self.list_edge_users(user_id, false, pagination).await
    }

    async fn list_edge_users(
        &self,
        user_id: &str,
        followers_of: bool,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResponse<UserSummary>> {
        let pick: fn(&follows::Model) -> String;
        let filter_col = if followers_of {
            pick = |e| e.follower_id.clone();
            follow_entity::Column::FollowedId
        } else {
            pick = |e| e.followed_id.clone();
            follow_entity::Column::FollowerId
        };

        let total = follow_entity::Entity::find()
            .filter(filter_col.eq(user_id))
            .count(self.pool.as_ref())
            .await?;

        let edges = follow_entity::Entity::find()
            .filter(filter_col.eq(user_id))
            .order_by_desc(follow_entity::Column::CreatedAt)
            .offset(pagination.get_offset() as u64)
            .limit(pagination.get_limit() as u64)
            .all(self.pool.as_ref())
            .await?;

        let ids: Vec<String> = edges.iter().map(pick).collect();
        let users = user_entity::Entity::find()
            .filter(user_entity::Column::Id.is_in(ids.clone()))
            .all(self.pool.as_ref())
            .await?;

        // preserve edge ordering
        let data = ids
            .into_iter()
            .filter_map(|id| {
                users
                    .iter()
                    .find(|u| u.id == id)
                    .cloned()
                    .map(UserSummary::from)
            })
            .collect();

        Ok(PaginatedResponse::new(
            data,
            pagination.page.unwrap_or(1).max(1),
            pagination.get_limit(),
            total as i64,
        ))
    }

    async fn count_followers(&self, user_id: &str) -> AppResult<i64> {
        let count = follow_entity::Entity::find()
            .filter(follow_entity::Column::FollowedId.eq(user_id))
            .count(self.pool.as_ref())
            .await?;
        Ok(count as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::users;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::collections::BTreeMap;

    fn user_fixture(id: &str) -> users::Model {
        let now = Utc::now();
        users::Model {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            password_hash: None,
            username: id.to_string(),
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
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn edge_fixture(follower_id: &str, followed_id: &str) -> follows::Model {
        follows::Model {
            follower_id: follower_id.to_string(),
            followed_id: followed_id.to_string(),
            notifications_enabled: true,
            created_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_follow_rejects_self() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = FollowService::new(db)
            .follow(
                "user-1",
                "user-1",
                FollowRequest {
                    notifications_enabled: None,
                },
            )
            .await;

        assert!(matches!(err, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_list_followers_resolves_edge_users() {
        let mut count_row = BTreeMap::new();
        count_row.insert("num_items", sea_orm::Value::BigInt(Some(2)));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row]])
            .append_query_results([vec![
                edge_fixture("fan-1", "artist-1"),
                edge_fixture("fan-2", "artist-1"),
            ]])
            // user lookup comes back in arbitrary order
            .append_query_results([vec![user_fixture("fan-2"), user_fixture("fan-1")]])
            .into_connection();

        let page = FollowService::new(db)
            .list_followers(
                "artist-1",
                PaginationParams {
                    page: None,
                    page_size: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        let ids: Vec<&str> = page.data.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["fan-1", "fan-2"]);
    }

    #[tokio::test]
    async fn test_list_following_picks_followed_side() {
        let mut count_row = BTreeMap::new();
        count_row.insert("num_items", sea_orm::Value::BigInt(Some(1)));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row]])
            .append_query_results([vec![edge_fixture("fan-1", "artist-1")]])
            .append_query_results([vec![user_fixture("artist-1")]])
            .into_connection();

        let page = FollowService::new(db)
            .list_following(
                "fan-1",
                PaginationParams {
                    page: None,
                    page_size: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, "artist-1");
    }

    #[tokio::test]
    async fn test_follow_state_when_not_following() {
        let mut count_row = std::collections::BTreeMap::new();
        count_row.insert("num_items", sea_orm::Value::BigInt(Some(3)));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<follows::Model>::new()])
            .append_query_results([vec![count_row]])
            .into_connection();

        let state = FollowService::new(db)
            .follow_state("viewer-1", "artist-1")
            .await
            .unwrap();

        assert!(!state.following);
        assert_eq!(state.followers, 3);
        assert_eq!(state.notifications_enabled, None);
    }
}

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{artwork_entity, comment_entity, comments, user_entity};
use crate::error::{AppError, AppResult};
use crate::models::{
    AddCommentRequest, CommentResponse, PaginatedResponse, PaginationParams, UpdateCommentRequest,
};

const MAX_COMMENT_LENGTH: usize = 2000;

fn validate_content(content: &str) -> AppResult<()> {
    if content.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Comment cannot be empty".to_string(),
        ));
    }
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(AppError::ValidationError(format!(
            "Comment cannot exceed {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct CommentService {
    pool: Arc<DatabaseConnection>,
}

impl CommentService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn add_comment(
        &self,
        artwork_id: &str,
        user_id: &str,
        req: AddCommentRequest,
    ) -> AppResult<CommentResponse> {
        validate_content(&req.content)?;

        let artwork = artwork_entity::Entity::find_by_id(artwork_id)
            .one(self.pool.as_ref())
            .await?;
        if artwork.is_none() {
            return Err(AppError::NotFound("Artwork not found".to_string()));
        }

        let now = Utc::now();
        let comment = comments::Model {
            id: Uuid::new_v4().to_string(),
            artwork_id: artwork_id.to_string(),
            user_id: user_id.to_string(),
            content: req.content.trim().to_string(),
            is_edited: false,
            created_at: Some(now),
            updated_at: Some(now),
        };

        comment_entity::Entity::insert(comment.clone().into_active_model())
            .exec_without_returning(self.pool.as_ref())
            .await?;

        Ok(CommentResponse::from(comment))
    }

    /// Newest first, decorated with each author's name and avatar.
    pub async fn list_comments(
        &self,
        artwork_id: &str,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResponse<CommentResponse>> {
        let total = comment_entity::Entity::find()
            .filter(comment_entity::Column::ArtworkId.eq(artwork_id))
            .count(self.pool.as_ref())
            .await?;

        let rows = comment_entity::Entity::find()
            .filter(comment_entity::Column::ArtworkId.eq(artwork_id))
            .order_by_desc(comment_entity::Column::CreatedAt)
            .offset(pagination.get_offset() as u64)
            .limit(pagination.get_limit() as u64)
            .all(self.pool.as_ref())
            .await?;

        let author_ids: Vec<String> = rows.iter().map(|c| c.user_id.clone()).collect();
        let authors = user_entity::Entity::find()
            .filter(user_entity::Column::Id.is_in(author_ids))
            .all(self.pool.as_ref())
            .await?;

        let data = rows
            .into_iter()
            .map(|comment| {
                let author = authors.iter().find(|u| u.id == comment.user_id);
                let mut response = CommentResponse::from(comment);
                if let Some(author) = author {
                    response.username = Some(author.username.clone());
                    response.profile_image = author.profile_image.clone();
                }
                response
            })
            .collect();

        Ok(PaginatedResponse::new(
            data,
            pagination.page.unwrap_or(1).max(1),
            pagination.get_limit(),
            total as i64,
        ))
    }

    pub async fn update_comment(
        &self,
        comment_id: &str,
        user_id: &str,
        req: UpdateCommentRequest,
    ) -> AppResult<CommentResponse> {
        validate_content(&req.content)?;

        let comment = self.find_comment(comment_id).await?;
        if comment.user_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can edit a comment".to_string(),
            ));
        }

        let mut updated = comment.into_active_model();
        updated.content = Set(req.content.trim().to_string());
        updated.is_edited = Set(true);
        updated.updated_at = Set(Some(Utc::now()));

        let saved = comment_entity::Entity::update(updated)
            .exec(self.pool.as_ref())
            .await?;
        Ok(CommentResponse::from(saved))
    }

    /// Authors can delete their own comments; the artwork owner can
    /// moderate any comment under their artwork.
    pub async fn delete_comment(&self, comment_id: &str, user_id: &str) -> AppResult<()> {
        let comment = self.find_comment(comment_id).await?;

        if comment.user_id != user_id {
            let artwork = artwork_entity::Entity::find_by_id(&comment.artwork_id)
                .one(self.pool.as_ref())
                .await?;
            let is_artwork_owner = artwork.map(|a| a.owner_id == user_id).unwrap_or(false);
            if !is_artwork_owner {
                return Err(AppError::Forbidden(
                    "Not allowed to delete this comment".to_string(),
                ));
            }
        }

        comment_entity::Entity::delete_by_id(comment_id)
            .exec(self.pool.as_ref())
            .await?;
        Ok(())
    }

    async fn find_comment(&self, comment_id: &str) -> AppResult<comments::Model> {
        comment_entity::Entity::find_by_id(comment_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_content_validation() {
        assert!(validate_content("Lovely brushwork").is_ok());
        assert!(validate_content("   ").is_err());
        assert!(validate_content(&"x".repeat(MAX_COMMENT_LENGTH + 1)).is_err());
    }

    #[tokio::test]
    async fn test_update_comment_requires_author() {
        let comment = comments::Model {
            id: "comment-1".to_string(),
            artwork_id: "art-1".to_string(),
            user_id: "author-1".to_string(),
            content: "Lovely brushwork".to_string(),
            is_edited: false,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![comment]])
            .into_connection();

        let err = CommentService::new(db)
            .update_comment(
                "comment-1",
                "someone-else",
                UpdateCommentRequest {
                    content: "Edited".to_string(),
                },
            )
            .await;

        assert!(matches!(err, Err(AppError::Forbidden(_))));
    }
}

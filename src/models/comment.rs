use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::comments;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: String,
    pub artwork_id: String,
    pub user_id: String,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub content: String,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
}

impl From<comments::Model> for CommentResponse {
    fn from(comment: comments::Model) -> Self {
        Self {
            id: comment.id,
            artwork_id: comment.artwork_id,
            user_id: comment.user_id,
            username: None,
            profile_image: None,
            content: comment.content,
            is_edited: comment.is_edited,
            created_at: comment.created_at.unwrap_or_else(Utc::now),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::collections;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCollectionRequest {
    #[schema(example = "Favorites")]
    pub name: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CollectionResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub is_public: bool,
    pub artwork_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<collections::Model> for CollectionResponse {
    fn from(collection: collections::Model) -> Self {
        Self {
            id: collection.id,
            name: collection.name,
            description: collection.description,
            cover_image: collection.cover_image,
            is_public: collection.is_public,
            artwork_count: 0,
            created_at: collection.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddCollectionArtworkRequest {
    pub artwork_id: String,
}

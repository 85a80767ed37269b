use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::artworks;

pub use crate::entities::artworks::OwnerType;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateArtworkRequest {
    #[schema(example = "Abstract Harmony")]
    pub title: String,
    pub description: Option<String>,
    pub year_created: Option<i32>,
    #[schema(example = "Oil on Canvas")]
    pub medium: Option<String>,
    pub style: Option<String>,
    pub subject: Option<String>,
    pub dimensions: Option<String>,
    pub dominant_color: Option<String>,
    /// Price in cents.
    pub price: Option<i64>,
    pub currency: Option<String>,
    #[serde(default)]
    pub is_for_sale: bool,
    pub external_sale_link: Option<String>,
    /// Attributed artist when a gallery or fair uploads on their behalf.
    pub artist_id: Option<String>,
    /// Image URLs, stored as a JSON array.
    pub images: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    pub material: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArtworkQuery {
    pub keyword: Option<String>,
    pub artist_id: Option<String>,
    pub style: Option<String>,
    pub medium: Option<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub dominant_color: Option<String>,
    pub subject: Option<String>,
    pub location: Option<String>,
    pub material: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArtworkResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub year_created: Option<i32>,
    pub medium: Option<String>,
    pub style: Option<String>,
    pub subject: Option<String>,
    pub dimensions: Option<String>,
    pub dominant_color: Option<String>,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub is_for_sale: bool,
    pub external_sale_link: Option<String>,
    pub owner_id: String,
    pub owner_type: OwnerType,
    pub artist_id: Option<String>,
    pub artist_name: Option<String>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub material: Option<String>,
    pub is_published: bool,
    pub likes: i64,
    pub comments: i64,
    pub created_at: DateTime<Utc>,
}

fn parse_json_list(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

impl From<artworks::Model> for ArtworkResponse {
    fn from(artwork: artworks::Model) -> Self {
        Self {
            images: parse_json_list(artwork.images.as_deref()),
            tags: parse_json_list(artwork.tags.as_deref()),
            id: artwork.id,
            title: artwork.title,
            description: artwork.description,
            year_created: artwork.year_created,
            medium: artwork.medium,
            style: artwork.style,
            subject: artwork.subject,
            dimensions: artwork.dimensions,
            dominant_color: artwork.dominant_color,
            price: artwork.price,
            currency: artwork.currency,
            is_for_sale: artwork.is_for_sale,
            external_sale_link: artwork.external_sale_link,
            owner_id: artwork.owner_id,
            owner_type: artwork.owner_type,
            artist_id: artwork.artist_id,
            artist_name: None,
            location: artwork.location,
            material: artwork.material,
            is_published: artwork.is_published,
            likes: 0,
            comments: 0,
            created_at: artwork.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Artwork detail enriched with the caller's own state.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArtworkDetailResponse {
    #[serde(flatten)]
    pub artwork: ArtworkResponse,
    pub is_liked: bool,
    pub your_rating: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SetLikeRequest {
    pub liked: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes: i64,
}

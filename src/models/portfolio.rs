use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::portfolios;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePortfolioRequest {
    #[schema(example = "Abstract Works")]
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
pub struct UpdatePortfolioRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PortfolioResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub is_public: bool,
    pub artwork_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<portfolios::Model> for PortfolioResponse {
    fn from(portfolio: portfolios::Model) -> Self {
        Self {
            id: portfolio.id,
            name: portfolio.name,
            description: portfolio.description,
            cover_image: portfolio.cover_image,
            is_public: portfolio.is_public,
            artwork_count: 0,
            created_at: portfolio.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddPortfolioArtworkRequest {
    pub artwork_id: String,
    pub position: Option<i32>,
}

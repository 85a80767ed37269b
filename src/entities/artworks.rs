use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum OwnerType {
    #[sea_orm(string_value = "artist")]
    Artist,
    #[sea_orm(string_value = "gallery")]
    Gallery,
    #[sea_orm(string_value = "fair")]
    Fair,
}

impl std::fmt::Display for OwnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerType::Artist => write!(f, "artist"),
            OwnerType::Gallery => write!(f, "gallery"),
            OwnerType::Fair => write!(f, "fair"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "artworks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    pub images: Option<String>,
    pub tags: Option<String>,
    pub location: Option<String>,
    pub material: Option<String>,
    pub is_published: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Contest association for an artwork. `average_rating` is the
/// materialized mean of all ratings for the artwork, refreshed on every
/// rating write; NULL until the first rating lands.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contest_artworks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub contest_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub artwork_id: String,
    pub average_rating: Option<f64>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_artworks;
mod m20250308_000001_create_contests;
mod m20250308_000002_create_artwork_ratings;
mod m20250315_000001_create_social;
mod m20250315_000002_create_collections;
mod m20250322_000001_create_portfolios;
mod m20250322_000002_create_verification_requests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_artworks::Migration),
            Box::new(m20250308_000001_create_contests::Migration),
            Box::new(m20250308_000002_create_artwork_ratings::Migration),
            Box::new(m20250315_000001_create_social::Migration),
            Box::new(m20250315_000002_create_collections::Migration),
            Box::new(m20250322_000001_create_portfolios::Migration),
            Box::new(m20250322_000002_create_verification_requests::Migration),
        ]
    }
}

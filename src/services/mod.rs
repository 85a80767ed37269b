pub mod artwork_service;
pub mod auth_service;
pub mod collection_service;
pub mod comment_service;
pub mod contest_service;
pub mod follow_service;
pub mod portfolio_service;
pub mod rating_service;
pub mod user_service;
pub mod verification_service;

pub use artwork_service::ArtworkService;
pub use auth_service::AuthService;
pub use collection_service::CollectionService;
pub use comment_service::CommentService;
pub use contest_service::ContestService;
pub use follow_service::FollowService;
pub use portfolio_service::PortfolioService;
pub use rating_service::RatingService;
pub use user_service::UserService;
pub use verification_service::VerificationService;

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::counter_entity;
use crate::error::AppResult;

/// Bumps one of the platform counters (total_users, total_artworks,
/// total_contests) by one.
pub(crate) async fn increment_counter(pool: &DatabaseConnection, name: &str) -> AppResult<()> {
    counter_entity::Entity::update_many()
        .col_expr(
            counter_entity::Column::Value,
            Expr::col(counter_entity::Column::Value).add(1),
        )
        .filter(counter_entity::Column::Name.eq(name))
        .exec(pool)
        .await?;
    Ok(())
}

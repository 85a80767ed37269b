pub mod artwork_likes;
pub mod artwork_ratings;
pub mod artworks;
pub mod collection_artworks;
pub mod collections;
pub mod comments;
pub mod contest_artworks;
pub mod contests;
pub mod counters;
pub mod follows;
pub mod portfolio_artworks;
pub mod portfolios;
pub mod users;
pub mod verification_requests;

pub use artwork_likes as artwork_like_entity;
pub use artwork_ratings as artwork_rating_entity;
pub use artworks as artwork_entity;
pub use collection_artworks as collection_artwork_entity;
pub use collections as collection_entity;
pub use comments as comment_entity;
pub use contest_artworks as contest_artwork_entity;
pub use contests as contest_entity;
pub use counters as counter_entity;
pub use follows as follow_entity;
pub use portfolio_artworks as portfolio_artwork_entity;
pub use portfolios as portfolio_entity;
pub use users as user_entity;
pub use verification_requests as verification_request_entity;

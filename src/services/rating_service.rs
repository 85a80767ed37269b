use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{artwork_entity, artwork_rating_entity, contest_artwork_entity};
use crate::error::{AppError, AppResult};
use crate::models::rating::{
    quantize_rating, validate_rating, RatingResponse, UserRatingResponse,
};

#[derive(FromQueryResult)]
struct RatingValue {
    rating: f64,
}

/// Rating submission and the materialized per-artwork average.
#[derive(Clone)]
pub struct RatingService {
    pool: Arc<DatabaseConnection>,
}

impl RatingService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    /// Records `value` as the caller's rating for the artwork. A repeat
    /// submission from the same user replaces the previous value rather
    /// than adding a second row; the unique index on
    /// (artwork_id, user_id) backs the ON CONFLICT target, so two
    /// concurrent first submissions collapse into one row as well.
    /// The artwork's average is recomputed before returning.
    pub async fn submit_rating(
        &self,
        artwork_id: &str,
        user_id: &str,
        value: f64,
    ) -> AppResult<RatingResponse> {
        validate_rating(value)?;
        let rating = quantize_rating(value);

        let artwork = artwork_entity::Entity::find_by_id(artwork_id)
            .one(self.pool.as_ref())
            .await?;
        if artwork.is_none() {
            return Err(AppError::NotFound("Artwork not found".to_string()));
        }

        let now = Utc::now();
        let row = artwork_rating_entity::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            artwork_id: Set(artwork_id.to_string()),
            user_id: Set(user_id.to_string()),
            rating: Set(rating),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };

        artwork_rating_entity::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    artwork_rating_entity::Column::ArtworkId,
                    artwork_rating_entity::Column::UserId,
                ])
                .update_columns([
                    artwork_rating_entity::Column::Rating,
                    artwork_rating_entity::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.pool.as_ref())
            .await?;

        let average_rating = self.recompute_average(artwork_id).await?;

        Ok(RatingResponse {
            rating,
            average_rating,
        })
    }

    /// Recomputes the mean over every rating for the artwork and writes
    /// it to all of the artwork's contest rows. Yields None (stored as
    /// NULL) when the artwork has no ratings. Safe to call any number
    /// of times; the result depends only on the stored ratings.
    pub async fn recompute_average(&self, artwork_id: &str) -> AppResult<Option<f64>> {
        let values: Vec<RatingValue> = artwork_rating_entity::Entity::find()
            .select_only()
            .column(artwork_rating_entity::Column::Rating)
            .filter(artwork_rating_entity::Column::ArtworkId.eq(artwork_id))
            .into_model()
            .all(self.pool.as_ref())
            .await?;

        let average = mean(values.iter().map(|v| v.rating));

        contest_artwork_entity::Entity::update_many()
            .col_expr(
                contest_artwork_entity::Column::AverageRating,
                Expr::value(average),
            )
            .filter(contest_artwork_entity::Column::ArtworkId.eq(artwork_id))
            .exec(self.pool.as_ref())
            .await?;

        Ok(average)
    }

    /// The caller's own rating for an artwork, if any.
    pub async fn get_user_rating(
        &self,
        artwork_id: &str,
        user_id: &str,
    ) -> AppResult<UserRatingResponse> {
        let found = artwork_rating_entity::Entity::find()
            .filter(artwork_rating_entity::Column::ArtworkId.eq(artwork_id))
            .filter(artwork_rating_entity::Column::UserId.eq(user_id))
            .one(self.pool.as_ref())
            .await?;

        Ok(UserRatingResponse {
            rating: found.map(|r| r.rating),
        })
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0u32;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::artworks::OwnerType;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn artwork_fixture(id: &str) -> artwork_entity::Model {
        artwork_entity::Model {
            id: id.to_string(),
            title: "Dusk over water".to_string(),
            description: None,
            year_created: Some(2024),
            medium: None,
            style: None,
            subject: None,
            dimensions: None,
            dominant_color: None,
            price: None,
            currency: None,
            is_for_sale: false,
            external_sale_link: None,
            owner_id: "owner-1".to_string(),
            owner_type: OwnerType::Artist,
            artist_id: None,
            images: None,
            tags: None,
            location: None,
            material: None,
            is_published: true,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    fn rating_fixture(artwork_id: &str, user_id: &str, rating: f64) -> artwork_rating_entity::Model {
        artwork_rating_entity::Model {
            id: Uuid::new_v4().to_string(),
            artwork_id: artwork_id.to_string(),
            user_id: user_id.to_string(),
            rating,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_mean_of_no_values_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn test_mean_two_ratings() {
        let avg = mean([8.0, 6.0].into_iter());
        assert_eq!(avg, Some(7.0));
    }

    #[test]
    fn test_mean_after_resubmission() {
        // the first user's 8.0 was replaced with 10.0
        let avg = mean([10.0, 6.0].into_iter());
        assert_eq!(avg, Some(8.0));
    }

    #[tokio::test]
    async fn test_submit_rating_returns_fresh_average() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![artwork_fixture("art-1")]])
            .append_exec_results([
                // upsert
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                // contest_artworks refresh
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
            ])
            .append_query_results([vec![
                rating_fixture("art-1", "user-1", 8.0),
                rating_fixture("art-1", "user-2", 6.0),
            ]])
            .into_connection();

        let service = RatingService::new(db);
        let resp = service
            .submit_rating("art-1", "user-2", 6.0)
            .await
            .unwrap();

        assert_eq!(resp.rating, 6.0);
        assert_eq!(resp.average_rating, Some(7.0));
    }

    #[tokio::test]
    async fn test_submit_rating_resubmission_replaces_value() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![artwork_fixture("art-1")]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            // still two rows after user-1 re-rated: the upsert replaced
            // their 8.0 with 10.0 instead of adding a third row
            .append_query_results([vec![
                rating_fixture("art-1", "user-1", 10.0),
                rating_fixture("art-1", "user-2", 6.0),
            ]])
            .into_connection();

        let service = RatingService::new(db);
        let resp = service
            .submit_rating("art-1", "user-1", 10.0)
            .await
            .unwrap();

        assert_eq!(resp.rating, 10.0);
        assert_eq!(resp.average_rating, Some(8.0));
    }

    #[tokio::test]
    async fn test_submit_rating_rejects_out_of_range() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = RatingService::new(db);

        assert!(service.submit_rating("art-1", "user-1", -0.1).await.is_err());
        assert!(service.submit_rating("art-1", "user-1", 10.1).await.is_err());
    }

    #[tokio::test]
    async fn test_submit_rating_accepts_boundaries() {
        for value in [0.0, 10.0] {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![artwork_fixture("art-1")]])
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 0,
                    },
                ])
                .append_query_results([vec![rating_fixture("art-1", "user-1", value)]])
                .into_connection();

            let service = RatingService::new(db);
            let resp = service.submit_rating("art-1", "user-1", value).await.unwrap();
            assert_eq!(resp.rating, value);
            assert_eq!(resp.average_rating, Some(value));
        }
    }

    #[tokio::test]
    async fn test_submit_rating_unknown_artwork() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<artwork_entity::Model>::new()])
            .into_connection();

        let service = RatingService::new(db);
        let err = service.submit_rating("missing", "user-1", 5.0).await;
        assert!(matches!(err, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_recompute_with_no_ratings_writes_null() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<artwork_rating_entity::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = RatingService::new(db);
        let avg = service.recompute_average("art-1").await.unwrap();
        assert_eq!(avg, None);
    }

    #[tokio::test]
    async fn test_get_user_rating_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<artwork_rating_entity::Model>::new()])
            .into_connection();

        let service = RatingService::new(db);
        let resp = service.get_user_rating("art-1", "user-1").await.unwrap();
        assert_eq!(resp.rating, None);
    }
}

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{
    artwork_entity, artwork_rating_entity, contest_artwork_entity, contest_entity, contests,
    user_entity,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ContestEntryResponse, ContestQuery, ContestResponse, CreateContestRequest, PaginatedResponse,
    PaginationParams, SubmitContestEntryRequest,
};

use super::increment_counter;

/// Status derived purely from the schedule, so a refresh at any moment
/// lands on the same answer.
fn status_for(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> contests::ContestStatus {
    if now < start {
        contests::ContestStatus::Upcoming
    } else if now < end {
        contests::ContestStatus::Active
    } else {
        contests::ContestStatus::Ended
    }
}

/// Standings order: higher averages first, unrated entries after every
/// rated one.
fn standings_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Clone)]
pub struct ContestService {
    pool: Arc<DatabaseConnection>,
}

impl ContestService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn create_contest(
        &self,
        creator_id: &str,
        req: CreateContestRequest,
    ) -> AppResult<ContestResponse> {
        if req.title.trim().is_empty() {
            return Err(AppError::ValidationError("Title is required".to_string()));
        }
        if req.end_date <= req.start_date {
            return Err(AppError::ValidationError(
                "End date must be after the start date".to_string(),
            ));
        }

        let now = Utc::now();
        let contest = contests::Model {
            id: Uuid::new_v4().to_string(),
            title: req.title,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            status: status_for(req.start_date, req.end_date, now),
            created_by: creator_id.to_string(),
            cover_image: req.cover_image,
            created_at: Some(now),
            updated_at: Some(now),
        };

        contest_entity::Entity::insert(contest.clone().into_active_model())
            .exec_without_returning(self.pool.as_ref())
            .await?;
        increment_counter(self.pool.as_ref(), "total_contests").await?;

        Ok(ContestResponse::from(contest))
    }

    pub async fn list_contests(
        &self,
        query: ContestQuery,
    ) -> AppResult<PaginatedResponse<ContestResponse>> {
        let mut finder = contest_entity::Entity::find();
        if let Some(status) = query.status {
            finder = finder.filter(contest_entity::Column::Status.eq(status));
        }

        let pagination = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let total = finder.clone().count(self.pool.as_ref()).await?;
        let rows = finder
            .order_by_desc(contest_entity::Column::StartDate)
            .offset(pagination.get_offset() as u64)
            .limit(pagination.get_limit() as u64)
            .all(self.pool.as_ref())
            .await?;

        let data = rows.into_iter().map(ContestResponse::from).collect();
        Ok(PaginatedResponse::new(
            data,
            pagination.page.unwrap_or(1).max(1),
            pagination.get_limit(),
            total as i64,
        ))
    }

    pub async fn get_contest(&self, contest_id: &str) -> AppResult<ContestResponse> {
        let contest = self.find_contest(contest_id).await?;
        Ok(ContestResponse::from(contest))
    }

    /// Enters an artwork into a contest. The same artwork cannot enter
    /// twice, and entries are only accepted while the contest has not
    /// ended.
    pub async fn submit_entry(
        &self,
        contest_id: &str,
        user_id: &str,
        req: SubmitContestEntryRequest,
    ) -> AppResult<()> {
        let contest = self.find_contest(contest_id).await?;
        if contest.status == contests::ContestStatus::Ended {
            return Err(AppError::ValidationError(
                "Contest has already ended".to_string(),
            ));
        }

        let artwork = artwork_entity::Entity::find_by_id(&req.artwork_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Artwork not found".to_string()))?;
        if artwork.owner_id != user_id {
            return Err(AppError::Forbidden(
                "Only the owner can enter an artwork".to_string(),
            ));
        }

        let existing = contest_artwork_entity::Entity::find_by_id((
            contest_id.to_string(),
            req.artwork_id.clone(),
        ))
        .one(self.pool.as_ref())
        .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Artwork is already entered in this contest".to_string(),
            ));
        }

        let row = contest_artwork_entity::ActiveModel {
            contest_id: Set(contest_id.to_string()),
            artwork_id: Set(req.artwork_id),
            average_rating: Set(None),
            submitted_at: Set(Some(Utc::now())),
        };
        contest_artwork_entity::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    contest_artwork_entity::Column::ContestId,
                    contest_artwork_entity::Column::ArtworkId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.pool.as_ref())
            .await?;

        Ok(())
    }

    /// Contest standings ordered by the materialized average, unrated
    /// entries last.
    pub async fn leaderboard(
        &self,
        contest_id: &str,
        viewer_id: Option<&str>,
    ) -> AppResult<Vec<ContestEntryResponse>> {
        self.find_contest(contest_id).await?;

        let mut entries = contest_artwork_entity::Entity::find()
            .filter(contest_artwork_entity::Column::ContestId.eq(contest_id))
            .order_by_asc(contest_artwork_entity::Column::SubmittedAt)
            .all(self.pool.as_ref())
            .await?;
        // stable sort, so equally rated entries keep submission order
        entries.sort_by(|a, b| standings_order(a.average_rating, b.average_rating));

        let artwork_ids: Vec<String> = entries.iter().map(|e| e.artwork_id.clone()).collect();
        let artworks = artwork_entity::Entity::find()
            .filter(artwork_entity::Column::Id.is_in(artwork_ids.clone()))
            .all(self.pool.as_ref())
            .await?;

        let artist_ids: Vec<String> = artworks
            .iter()
            .filter_map(|a| a.artist_id.clone())
            .collect();
        let artists = user_entity::Entity::find()
            .filter(user_entity::Column::Id.is_in(artist_ids))
            .all(self.pool.as_ref())
            .await?;

        let viewer_ratings = match viewer_id {
            Some(viewer_id) => {
                artwork_rating_entity::Entity::find()
                    .filter(artwork_rating_entity::Column::UserId.eq(viewer_id))
                    .filter(artwork_rating_entity::Column::ArtworkId.is_in(artwork_ids))
                    .all(self.pool.as_ref())
                    .await?
            }
            None => Vec::new(),
        };

        let board = entries
            .into_iter()
            .filter_map(|entry| {
                let artwork = artworks.iter().find(|a| a.id == entry.artwork_id)?;
                let artist_name = artwork.artist_id.as_deref().and_then(|artist_id| {
                    artists
                        .iter()
                        .find(|u| u.id == artist_id)
                        .map(|u| u.username.clone())
                });
                let your_rating = viewer_ratings
                    .iter()
                    .find(|r| r.artwork_id == entry.artwork_id)
                    .map(|r| r.rating);
                Some(ContestEntryResponse {
                    artwork_id: entry.artwork_id,
                    title: artwork.title.clone(),
                    artist_name,
                    average_rating: entry.average_rating,
                    your_rating,
                    submitted_at: entry.submitted_at,
                })
            })
            .collect();

        Ok(board)
    }

    /// Moves every contest whose schedule has overtaken its stored
    /// status. Runs from the background loop and is safe to repeat.
    pub async fn refresh_statuses(&self) -> AppResult<u64> {
        let now = Utc::now();
        let mut changed = 0;

        let activated = contest_entity::Entity::update_many()
            .col_expr(
                contest_entity::Column::Status,
                Expr::value(contests::ContestStatus::Active),
            )
            .filter(contest_entity::Column::Status.eq(contests::ContestStatus::Upcoming))
            .filter(contest_entity::Column::StartDate.lte(now))
            .filter(contest_entity::Column::EndDate.gt(now))
            .exec(self.pool.as_ref())
            .await?;
        changed += activated.rows_affected;

        let ended = contest_entity::Entity::update_many()
            .col_expr(
                contest_entity::Column::Status,
                Expr::value(contests::ContestStatus::Ended),
            )
            .filter(contest_entity::Column::Status.ne(contests::ContestStatus::Ended))
            .filter(contest_entity::Column::EndDate.lte(now))
            .exec(self.pool.as_ref())
            .await?;
        changed += ended.rows_affected;

        Ok(changed)
    }

    async fn find_contest(&self, contest_id: &str) -> AppResult<contests::Model> {
        contest_entity::Entity::find_by_id(contest_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{artworks, contest_artworks};
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[test]
    fn test_status_follows_schedule() {
        let now = Utc::now();
        let start = now + Duration::hours(1);
        let end = now + Duration::hours(2);
        assert_eq!(status_for(start, end, now), contests::ContestStatus::Upcoming);

        let start = now - Duration::hours(1);
        assert_eq!(status_for(start, end, now), contests::ContestStatus::Active);

        let end = now - Duration::minutes(1);
        assert_eq!(status_for(start, end, now), contests::ContestStatus::Ended);
    }

    #[test]
    fn test_standings_put_unrated_entries_last() {
        let mut averages = vec![None, Some(7.0), Some(9.5), None, Some(8.0)];
        averages.sort_by(|a, b| standings_order(*a, *b));
        assert_eq!(averages, vec![Some(9.5), Some(8.0), Some(7.0), None, None]);
    }

    fn contest_fixture(status: contests::ContestStatus) -> contests::Model {
        let now = Utc::now();
        contests::Model {
            id: "contest-1".to_string(),
            title: "Weekly Art Contest".to_string(),
            description: None,
            start_date: now - Duration::days(1),
            end_date: now + Duration::days(6),
            status,
            created_by: "curator-1".to_string(),
            cover_image: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    #[tokio::test]
    async fn test_create_contest_rejects_inverted_schedule() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let now = Utc::now();

        let err = ContestService::new(db)
            .create_contest(
                "curator-1",
                CreateContestRequest {
                    title: "Weekly Art Contest".to_string(),
                    description: None,
                    start_date: now,
                    end_date: now - Duration::days(1),
                    cover_image: None,
                },
            )
            .await;

        assert!(matches!(err, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_submit_entry_rejects_ended_contest() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![contest_fixture(contests::ContestStatus::Ended)]])
            .into_connection();

        let err = ContestService::new(db)
            .submit_entry(
                "contest-1",
                "owner-1",
                SubmitContestEntryRequest {
                    artwork_id: "art-1".to_string(),
                },
            )
            .await;

        assert!(matches!(err, Err(AppError::ValidationError(_))));
    }

    fn artwork_fixture(id: &str, owner_id: &str) -> artworks::Model {
        let now = Utc::now();
        artworks::Model {
            id: id.to_string(),
            title: format!("Piece {}", id),
            description: None,
            year_created: None,
            medium: None,
            style: None,
            subject: None,
            dimensions: None,
            dominant_color: None,
            price: None,
            currency: None,
            is_for_sale: false,
            external_sale_link: None,
            owner_id: owner_id.to_string(),
            owner_type: artworks::OwnerType::Artist,
            artist_id: None,
            images: None,
            tags: None,
            location: None,
            material: None,
            is_published: true,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn entry_fixture(artwork_id: &str, average: Option<f64>) -> contest_artworks::Model {
        contest_artworks::Model {
            contest_id: "contest-1".to_string(),
            artwork_id: artwork_id.to_string(),
            average_rating: average,
            submitted_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_submit_entry_rejects_duplicate_artwork() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![contest_fixture(contests::ContestStatus::Active)]])
            .append_query_results([vec![artwork_fixture("art-1", "owner-1")]])
            .append_query_results([vec![entry_fixture("art-1", None)]])
            .into_connection();

        let err = ContestService::new(db)
            .submit_entry(
                "contest-1",
                "owner-1",
                SubmitContestEntryRequest {
                    artwork_id: "art-1".to_string(),
                },
            )
            .await;

        assert!(matches!(err, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_leaderboard_orders_rated_entries_first() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![contest_fixture(contests::ContestStatus::Active)]])
            // entries come back in submission order
            .append_query_results([vec![
                entry_fixture("art-1", None),
                entry_fixture("art-2", Some(9.0)),
                entry_fixture("art-3", Some(7.0)),
            ]])
            .append_query_results([vec![
                artwork_fixture("art-1", "owner-1"),
                artwork_fixture("art-2", "owner-2"),
                artwork_fixture("art-3", "owner-3"),
            ]])
            .append_query_results([Vec::<crate::entities::users::Model>::new()])
            .into_connection();

        let board = ContestService::new(db)
            .leaderboard("contest-1", None)
            .await
            .unwrap();

        let order: Vec<&str> = board.iter().map(|e| e.artwork_id.as_str()).collect();
        assert_eq!(order, vec!["art-2", "art-3", "art-1"]);
        assert_eq!(board[0].average_rating, Some(9.0));
        assert_eq!(board[2].average_rating, None);
    }

    #[tokio::test]
    async fn test_refresh_statuses_counts_transitions() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let changed = ContestService::new(db).refresh_statuses().await.unwrap();
        assert_eq!(changed, 3);
    }
}

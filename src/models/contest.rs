use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::contests;

pub use crate::entities::contests::ContestStatus;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateContestRequest {
    #[schema(example = "Weekly Art Contest")]
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub cover_image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContestResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: ContestStatus,
    pub created_by: String,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<contests::Model> for ContestResponse {
    fn from(contest: contests::Model) -> Self {
        Self {
            id: contest.id,
            title: contest.title,
            description: contest.description,
            start_date: contest.start_date,
            end_date: contest.end_date,
            status: contest.status,
            created_by: contest.created_by,
            cover_image: contest.cover_image,
            created_at: contest.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitContestEntryRequest {
    pub artwork_id: String,
}

/// One row of a contest leaderboard; ordered by the materialized
/// average, rated entries first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContestEntryResponse {
    pub artwork_id: String,
    pub title: String,
    pub artist_name: Option<String>,
    pub average_rating: Option<f64>,
    pub your_rating: Option<f64>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContestQuery {
    pub status: Option<ContestStatus>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

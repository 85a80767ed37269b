use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::verification_requests;

pub use crate::entities::verification_requests::VerificationStatus;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitVerificationRequest {
    #[schema(example = "Jane Smith")]
    pub full_name: String,
    pub organization: Option<String>,
    pub reason: String,
    /// References (URLs) to already-uploaded supporting documents.
    pub documents: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewVerificationRequest {
    pub approve: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerificationResponse {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub organization: Option<String>,
    pub reason: String,
    pub documents: Vec<String>,
    pub status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<verification_requests::Model> for VerificationResponse {
    fn from(request: verification_requests::Model) -> Self {
        let documents = serde_json::from_str(&request.documents).unwrap_or_default();
        Self {
            id: request.id,
            user_id: request.user_id,
            full_name: request.full_name,
            organization: request.organization,
            reason: request.reason,
            documents,
            status: request.status,
            created_at: request.created_at.unwrap_or_else(Utc::now),
        }
    }
}

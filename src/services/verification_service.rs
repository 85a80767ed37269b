use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{user_entity, verification_request_entity, verification_requests};
use crate::error::{AppError, AppResult};
use crate::models::{SubmitVerificationRequest, VerificationResponse, VerificationStatus};

#[derive(Clone)]
pub struct VerificationService {
    pool: Arc<DatabaseConnection>,
}

impl VerificationService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    /// Files a verification request. One pending request per account;
    /// an already-verified account cannot file another.
    pub async fn submit_request(
        &self,
        user_id: &str,
        req: SubmitVerificationRequest,
    ) -> AppResult<VerificationResponse> {
        if req.full_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Full name is required".to_string(),
            ));
        }
        if req.reason.trim().is_empty() {
            return Err(AppError::ValidationError("Reason is required".to_string()));
        }
        if req.documents.iter().all(|d| d.trim().is_empty()) {
            return Err(AppError::ValidationError(
                "At least one supporting document is required".to_string(),
            ));
        }

        let user = user_entity::Entity::find_by_id(user_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        if user.is_verified {
            return Err(AppError::ValidationError(
                "Account is already verified".to_string(),
            ));
        }

        let pending = verification_request_entity::Entity::find()
            .filter(verification_request_entity::Column::UserId.eq(user_id))
            .filter(verification_request_entity::Column::Status.eq(VerificationStatus::Pending))
            .one(self.pool.as_ref())
            .await?;
        if pending.is_some() {
            return Err(AppError::ValidationError(
                "A verification request is already pending".to_string(),
            ));
        }

        let now = Utc::now();
        let request = verification_requests::Model {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            full_name: req.full_name.trim().to_string(),
            organization: req.organization,
            reason: req.reason,
            documents: serde_json::to_string(&req.documents)?,
            status: VerificationStatus::Pending,
            created_at: Some(now),
            updated_at: Some(now),
        };

        verification_request_entity::Entity::insert(request.clone().into_active_model())
            .exec_without_returning(self.pool.as_ref())
            .await?;

        Ok(VerificationResponse::from(request))
    }

    /// The caller's most recent request, if any.
    pub async fn my_request(&self, user_id: &str) -> AppResult<Option<VerificationResponse>> {
        let latest = verification_request_entity::Entity::find()
            .filter(verification_request_entity::Column::UserId.eq(user_id))
            .order_by_desc(verification_request_entity::Column::CreatedAt)
            .one(self.pool.as_ref())
            .await?;
        Ok(latest.map(VerificationResponse::from))
    }

    pub async fn list_pending(&self) -> AppResult<Vec<VerificationResponse>> {
        let rows = verification_request_entity::Entity::find()
            .filter(verification_request_entity::Column::Status.eq(VerificationStatus::Pending))
            .order_by_asc(verification_request_entity::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(VerificationResponse::from).collect())
    }

    /// Settles a pending request. Only verified accounts may review,
    /// and never their own request; approval flips the requester's
    /// verified badge on.
    pub async fn review_request(
        &self,
        request_id: &str,
        reviewer_id: &str,
        approve: bool,
    ) -> AppResult<VerificationResponse> {
        let reviewer = user_entity::Entity::find_by_id(reviewer_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        if !reviewer.is_verified {
            return Err(AppError::Forbidden(
                "Only verified accounts can review requests".to_string(),
            ));
        }

        let request = verification_request_entity::Entity::find_by_id(request_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Verification request not found".to_string()))?;
        if request.user_id == reviewer_id {
            return Err(AppError::Forbidden(
                "Cannot review your own request".to_string(),
            ));
        }
        if request.status != VerificationStatus::Pending {
            return Err(AppError::ValidationError(
                "Request has already been reviewed".to_string(),
            ));
        }

        let requester_id = request.user_id.clone();
        let mut updated = request.into_active_model();
        updated.status = Set(if approve {
            VerificationStatus::Approved
        } else {
            VerificationStatus::Rejected
        });
        updated.updated_at = Set(Some(Utc::now()));
        let saved = verification_request_entity::Entity::update(updated)
            .exec(self.pool.as_ref())
            .await?;

        if approve {
            if let Some(requester) = user_entity::Entity::find_by_id(&requester_id)
                .one(self.pool.as_ref())
                .await?
            {
                let mut verified = requester.into_active_model();
                verified.is_verified = Set(true);
                verified.updated_at = Set(Some(Utc::now()));
                user_entity::Entity::update(verified).exec(self.pool.as_ref()).await?;
            }
        }

        Ok(VerificationResponse::from(saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::users;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user_fixture(is_verified: bool) -> users::Model {
        users::Model {
            id: "user-1".to_string(),
            email: "user@example.com".to_string(),
            password_hash: None,
            username: "user".to_string(),
            first_name: None,
            last_name: None,
            profile_image: None,
            bio: None,
            location: None,
            website: None,
            social_media_links: None,
            user_type: users::UserType::Artist,
            oauth_provider: None,
            oauth_id: None,
            is_verified,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_submit_rejects_verified_accounts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_fixture(true)]])
            .into_connection();

        let err = VerificationService::new(db)
            .submit_request(
                "user-1",
                SubmitVerificationRequest {
                    full_name: "Jane Smith".to_string(),
                    organization: None,
                    reason: "Professional artist".to_string(),
                    documents: vec!["https://example.com/portfolio.pdf".to_string()],
                },
            )
            .await;

        assert!(matches!(err, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_review_requires_verified_reviewer() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_fixture(false)]])
            .into_connection();

        let err = VerificationService::new(db)
            .review_request("req-1", "user-1", true)
            .await;

        assert!(matches!(err, Err(AppError::Forbidden(_))));
    }
}

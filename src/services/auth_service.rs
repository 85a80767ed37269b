use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::{user_entity, users};
use crate::error::{AppError, AppResult};
use crate::external::GoogleOAuthService;
use crate::models::{AuthResponse, CreateUserRequest, LoginRequest, UserResponse};
use crate::utils::{
    hash_password, validate_email, validate_password, validate_username, verify_password,
    JwtService,
};

use super::increment_counter;

#[derive(Clone)]
pub struct AuthService {
    pool: Arc<DatabaseConnection>,
    jwt: JwtService,
    google: GoogleOAuthService,
}

impl AuthService {
    pub fn new(
        pool: impl Into<Arc<DatabaseConnection>>,
        jwt: JwtService,
        google: GoogleOAuthService,
    ) -> Self {
        Self {
            pool: pool.into(),
            jwt,
            google,
        }
    }

    pub async fn register(&self, req: CreateUserRequest) -> AppResult<AuthResponse> {
        validate_email(&req.email)?;
        validate_username(&req.username)?;
        validate_password(&req.password)?;

        let existing = user_entity::Entity::find()
            .filter(user_entity::Column::Email.eq(req.email.as_str()))
            .one(self.pool.as_ref())
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Email is already registered".to_string(),
            ));
        }

        let now = Utc::now();
        let user = users::Model {
            id: Uuid::new_v4().to_string(),
            email: req.email,
            password_hash: Some(hash_password(&req.password)?),
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            profile_image: None,
            bio: None,
            location: None,
            website: None,
            social_media_links: None,
            user_type: req.user_type,
            oauth_provider: None,
            oauth_id: None,
            is_verified: false,
            created_at: Some(now),
            updated_at: Some(now),
        };

        user_entity::Entity::insert(user.clone().into_active_model())
            .exec_without_returning(self.pool.as_ref())
            .await?;
        increment_counter(self.pool.as_ref(), "total_users").await?;

        self.issue_tokens(user)
    }

    pub async fn login(&self, req: LoginRequest) -> AppResult<AuthResponse> {
        let user = user_entity::Entity::find()
            .filter(user_entity::Column::Email.eq(req.email.as_str()))
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::AuthError("Account uses social sign-in".to_string()))?;
        if !verify_password(&req.password, hash)? {
            return Err(AppError::AuthError("Invalid email or password".to_string()));
        }

        self.issue_tokens(user)
    }

    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt.verify_refresh_token(refresh_token)?;
        let user = user_entity::Entity::find_by_id(&claims.sub)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::AuthError("User no longer exists".to_string()))?;

        self.issue_tokens(user)
    }

    /// Exchanges a Google authorization code for a session. An existing
    /// account matched by oauth id or email gets linked; otherwise an
    /// art-lover account is created.
    pub async fn google_login(&self, code: &str) -> AppResult<AuthResponse> {
        let info = self.google.fetch_user(code).await?;

        let by_oauth = user_entity::Entity::find()
            .filter(user_entity::Column::OauthProvider.eq("google"))
            .filter(user_entity::Column::OauthId.eq(info.sub.as_str()))
            .one(self.pool.as_ref())
            .await?;
        if let Some(user) = by_oauth {
            return self.issue_tokens(user);
        }

        let by_email = user_entity::Entity::find()
            .filter(user_entity::Column::Email.eq(info.email.as_str()))
            .one(self.pool.as_ref())
            .await?;
        if let Some(user) = by_email {
            let mut linked = user.clone().into_active_model();
            linked.oauth_provider = Set(Some("google".to_string()));
            linked.oauth_id = Set(Some(info.sub.clone()));
            linked.updated_at = Set(Some(Utc::now()));
            user_entity::Entity::update(linked).exec(self.pool.as_ref()).await?;

            let mut user = user;
            user.oauth_provider = Some("google".to_string());
            user.oauth_id = Some(info.sub);
            return self.issue_tokens(user);
        }

        let now = Utc::now();
        let username = info
            .email
            .split('@')
            .next()
            .unwrap_or("lover")
            .to_string();
        let user = users::Model {
            id: Uuid::new_v4().to_string(),
            email: info.email,
            password_hash: None,
            username,
            first_name: info.name,
            last_name: None,
            profile_image: info.picture,
            bio: None,
            location: None,
            website: None,
            social_media_links: None,
            user_type: users::UserType::Lover,
            oauth_provider: Some("google".to_string()),
            oauth_id: Some(info.sub),
            is_verified: false,
            created_at: Some(now),
            updated_at: Some(now),
        };

        user_entity::Entity::insert(user.clone().into_active_model())
            .exec_without_returning(self.pool.as_ref())
            .await?;
        increment_counter(self.pool.as_ref(), "total_users").await?;

        self.issue_tokens(user)
    }

    fn issue_tokens(&self, user: users::Model) -> AppResult<AuthResponse> {
        let user_type = user.user_type.to_string();
        let access_token = self.jwt.generate_access_token(&user.id, &user_type)?;
        let refresh_token = self.jwt.generate_refresh_token(&user.id, &user_type)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
            expires_in: self.jwt.get_access_token_expires_in(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GoogleConfig;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn service(db: DatabaseConnection) -> AuthService {
        let jwt = JwtService::new("test-secret", 3600, 86400);
        let google = GoogleOAuthService::new(GoogleConfig::default());
        AuthService::new(db, jwt, google)
    }

    fn user_fixture(email: &str, password: &str) -> users::Model {
        users::Model {
            id: "user-1".to_string(),
            email: email.to_string(),
            password_hash: Some(hash_password(password).unwrap()),
            username: "jane".to_string(),
            first_name: None,
            last_name: None,
            profile_image: None,
            bio: None,
            location: None,
            website: None,
            social_media_links: None,
            user_type: users::UserType::Lover,
            oauth_provider: None,
            oauth_id: None,
            is_verified: false,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_register_issues_tokens() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
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
            .into_connection();

        let resp = service(db)
            .register(CreateUserRequest {
                email: "jane@example.com".to_string(),
                password: "Password123".to_string(),
                username: "jane".to_string(),
                user_type: users::UserType::Artist,
                first_name: None,
                last_name: None,
            })
            .await
            .unwrap();

        assert_eq!(resp.user.email, "jane@example.com");
        assert!(!resp.access_token.is_empty());
        assert!(!resp.refresh_token.is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_fixture("jane@example.com", "Password123")]])
            .into_connection();

        let err = service(db)
            .register(CreateUserRequest {
                email: "jane@example.com".to_string(),
                password: "Password123".to_string(),
                username: "jane".to_string(),
                user_type: users::UserType::Lover,
                first_name: None,
                last_name: None,
            })
            .await;

        assert!(matches!(err, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_fixture("jane@example.com", "Password123")]])
            .into_connection();

        let err = service(db)
            .login(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "WrongPassword1".to_string(),
            })
            .await;

        assert!(matches!(err, Err(AppError::AuthError(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_fixture("jane@example.com", "Password123")]])
            .into_connection();

        let resp = service(db)
            .login(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "Password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(resp.user.id, "user-1");
        assert!(!resp.access_token.is_empty());
    }
}

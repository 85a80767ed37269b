pub mod artwork;
pub mod auth;
pub mod collection;
pub mod comment;
pub mod contest;
pub mod portfolio;
pub mod user;
pub mod verification;

pub use artwork::artwork_config;
pub use auth::auth_config;
pub use collection::collection_config;
pub use comment::comment_config;
pub use contest::contest_config;
pub use portfolio::portfolio_config;
pub use user::user_config;
pub use verification::verification_config;

use actix_web::{HttpMessage, HttpRequest};

use crate::error::AppError;
use crate::middlewares::AuthenticatedUser;

pub(crate) fn auth_user(req: &HttpRequest) -> Option<AuthenticatedUser> {
    req.extensions().get::<AuthenticatedUser>().cloned()
}

pub(crate) fn require_user(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    auth_user(req).ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

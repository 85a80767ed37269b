use crate::config::GoogleConfig;
use crate::error::{AppError, AppResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

#[derive(Clone)]
pub struct GoogleOAuthService {
    http: Client,
    cfg: GoogleConfig,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    #[allow(dead_code)]
    id_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoogleUserInfo {
    /// Stable Google account id, recorded as oauth_id.
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl GoogleOAuthService {
    pub fn new(cfg: GoogleConfig) -> Self {
        Self {
            http: Client::new(),
            cfg,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.cfg.client_id.is_empty() && !self.cfg.client_secret.is_empty()
    }

    /// Exchanges an authorization code for the signed-in user's profile.
    pub async fn fetch_user(&self, code: &str) -> AppResult<GoogleUserInfo> {
        if !self.is_enabled() {
            return Err(AppError::ExternalApiError(
                "Google OAuth is not configured".to_string(),
            ));
        }
        if code.is_empty() {
            return Err(AppError::ValidationError(
                "Missing authorization code".to_string(),
            ));
        }

        let params = [
            ("code", code),
            ("client_id", self.cfg.client_id.as_str()),
            ("client_secret", self.cfg.client_secret.as_str()),
            ("redirect_uri", self.cfg.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let resp = self.http.post(TOKEN_ENDPOINT).form(&params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::ExternalApiError(format!(
                "Google token exchange failed: HTTP {}",
                status.as_u16()
            )));
        }
        let token: TokenResponse = resp.json().await?;

        let resp = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::ExternalApiError(format!(
                "Google userinfo fetch failed: HTTP {}",
                status.as_u16()
            )));
        }

        let info: GoogleUserInfo = resp.json().await?;
        Ok(info)
    }
}

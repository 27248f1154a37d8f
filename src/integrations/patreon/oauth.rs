// src/integrations/patreon/oauth.rs
//
// OAuth token endpoint
//
// The browser step that yields an authorization code is an external
// collaborator. This module only exchanges codes and refresh tokens for
// bearer credentials.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::TOKEN_URL;
use crate::domain::Credential;
use crate::error::{AppError, AppResult};

/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 2 * 60 * 60;

/// Produces valid bearer credentials for the membership API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Obtain a credential without a refresh token in hand
    async fn obtain(&self) -> AppResult<Credential>;

    /// Trade a refresh token for a new credential
    async fn refresh(&self, refresh_token: &str) -> AppResult<Credential>;
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    #[allow(dead_code)] // Part of the token response schema
    scope: Option<String>,
    #[allow(dead_code)] // Part of the token response schema
    token_type: Option<String>,
}

impl AccessTokenResponse {
    fn into_credential(self) -> Credential {
        let lifetime = self.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        Credential {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: Utc::now() + Duration::seconds(lifetime),
        }
    }
}

/// Client credentials plus whatever tokens were stored from a previous run
pub struct PatreonOAuthClient {
    http_client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    stored_access_token: Option<String>,
    stored_refresh_token: Option<String>,
}

impl PatreonOAuthClient {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            token_url: TOKEN_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            stored_access_token: None,
            stored_refresh_token: None,
        })
    }

    /// Tokens persisted by the preferences store
    pub fn with_stored_tokens(
        mut self,
        access_token: Option<String>,
        refresh_token: Option<String>,
    ) -> Self {
        self.stored_access_token = access_token.filter(|t| !t.trim().is_empty());
        self.stored_refresh_token = refresh_token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Authorization-code grant
    pub async fn exchange_code(&self, code: &str) -> AppResult<Credential> {
        let form = [
            ("code", code),
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];
        self.request_token(&form).await
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> AppResult<Credential> {
        let response = self
            .http_client
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Session(format!(
                "Token endpoint returned status: {}",
                response.status()
            )));
        }

        let token: AccessTokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("Failed to parse token response: {}", e)))?;

        Ok(token.into_credential())
    }
}

#[async_trait]
impl CredentialProvider for PatreonOAuthClient {
    async fn obtain(&self) -> AppResult<Credential> {
        if let Some(refresh_token) = &self.stored_refresh_token {
            return self.refresh(refresh_token).await;
        }
        match &self.stored_access_token {
            Some(access_token) => Ok(Credential {
                access_token: access_token.clone(),
                refresh_token: None,
                expires_at: Utc::now() + Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS),
            }),
            None => Err(AppError::Session(
                "No stored token; complete the authorization flow first".to_string(),
            )),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<Credential> {
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        self.request_token(&form).await
    }
}

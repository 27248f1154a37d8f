// src/services/session_service.rs
//
// Session Service
//
// Drives the session state machine before a live ingestion:
//   Authenticated (unexpired)     -> unchanged
//   Expired with a refresh token  -> refresh grant
//   Expired without one / Unauth. -> obtain from the provider

use chrono::Utc;
use std::sync::Arc;

use crate::domain::Session;
use crate::error::AppResult;
use crate::integrations::CredentialProvider;

pub struct SessionService {
    provider: Arc<dyn CredentialProvider>,
}

impl SessionService {
    pub fn new(provider: Arc<dyn CredentialProvider>) -> Self {
        Self { provider }
    }

    /// Leave `session` authenticated with an unexpired credential
    pub async fn ensure_authenticated(&self, session: &mut Session) -> AppResult<()> {
        if session.expire_if_due(Utc::now()) {
            log::info!("Session credential expired");
        }

        let credential = match session {
            Session::Authenticated(_) => return Ok(()),
            Session::Expired {
                refresh_token: Some(refresh_token),
            } => {
                log::info!("Refreshing session credential");
                self.provider.refresh(refresh_token).await?
            }
            Session::Expired {
                refresh_token: None,
            }
            | Session::Unauthenticated => {
                log::info!("Obtaining session credential");
                self.provider.obtain().await?
            }
        };

        session.authenticate(credential);
        Ok(())
    }
}

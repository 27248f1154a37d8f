// src/domain/session.rs
//
// Membership API session
//
// Owned by the caller and passed into ingestion explicitly.
//
//   Unauthenticated --authenticate--> Authenticated --expiry--> Expired
//   Expired --authenticate (after refresh)--> Authenticated

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Bearer credential for the membership API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated(Credential),
    Expired { refresh_token: Option<String> },
}

impl Session {
    /// Install a fresh credential. Valid from any state.
    pub fn authenticate(&mut self, credential: Credential) {
        *self = Session::Authenticated(credential);
    }

    /// Move to `Expired` if the held credential is past its expiry.
    /// Returns true when a transition happened.
    pub fn expire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        let refresh_token = match self {
            Session::Authenticated(credential) if credential.is_expired_at(now) => {
                credential.refresh_token.take()
            }
            _ => return false,
        };
        *self = Session::Expired { refresh_token };
        true
    }

    /// The bearer token, only while authenticated and unexpired
    pub fn bearer_token(&self, now: DateTime<Utc>) -> DomainResult<&str> {
        match self {
            Session::Authenticated(credential) if !credential.is_expired_at(now) => {
                Ok(&credential.access_token)
            }
            Session::Authenticated(_) | Session::Expired { .. } => Err(
                DomainError::InvalidStateTransition("Session credential has expired".to_string()),
            ),
            Session::Unauthenticated => Err(DomainError::InvalidStateTransition(
                "Session is not authenticated".to_string(),
            )),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Tier resolution error: {0}")]
    TierResolution(String),

    #[error("No eligible candidates in the drawing pool")]
    EmptyPool,

    #[error("Session error: {0}")]
    Session(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(format!("Malformed API payload: {}", err))
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Decode(format!("Date parse error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

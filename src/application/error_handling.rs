// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};
use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// No member data has been ingested yet
    NotFound,

    /// Invalid input/validation error
    Validation,

    /// Domain invariant violation
    DomainError,

    /// Membership API or token endpoint failure
    ExternalService,

    /// File system error
    FileSystem,

    /// Nobody left to draw
    EmptyPool,

    /// Missing or expired credentials
    Session,

    /// Operation stopped by the caller
    Cancelled,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::MissingData(message) => Self::new(
                ErrorType::NotFound,
                "Member data is missing",
                Some(message),
            ),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::TierResolution(message) => Self::new(
                ErrorType::DomainError,
                "Members reference unknown tiers",
                Some(message),
            ),

            AppError::Network(message) => {
                log::error!("Network error: {}", message);
                Self::new(
                    ErrorType::ExternalService,
                    "Could not reach the membership platform",
                    Some(message),
                )
            }

            AppError::Decode(message) => {
                log::error!("Decode error: {}", message);
                Self::new(
                    ErrorType::ExternalService,
                    "Received malformed member data",
                    Some(message),
                )
            }

            AppError::EmptyPool => Self::new(
                ErrorType::EmptyPool,
                "No eligible members left to draw",
                None,
            ),

            AppError::Session(message) => Self::new(
                ErrorType::Session,
                "Not signed in to the membership platform",
                Some(message),
            ),

            AppError::Cancelled => Self::new(ErrorType::Cancelled, "Operation cancelled", None),

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_app_error(e);
            serde_json::to_string(&error_response)
                .unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_missing_data_is_not_found() {
        let error = ErrorResponse::from_app_error(AppError::MissingData("no tiers".to_string()));
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.details.as_deref(), Some("no tiers"));
    }

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::validation("Invalid input".to_string());
        assert_eq!(error.error_type, ErrorType::Validation);
        assert!(!error.success);
    }

    #[test]
    fn test_empty_pool() {
        let error = ErrorResponse::from_app_error(AppError::EmptyPool);
        assert_eq!(error.error_type, ErrorType::EmptyPool);
    }

    #[test]
    fn test_domain_error() {
        let error = ErrorResponse::from_app_error(AppError::Domain(
            DomainError::InvariantViolation("bad".to_string()),
        ));
        assert_eq!(error.error_type, ErrorType::DomainError);
    }

    #[test]
    fn test_network_is_external_service() {
        let error = ErrorResponse::from_app_error(AppError::Network("timeout".to_string()));
        assert_eq!(error.error_type, ErrorType::ExternalService);
    }

    #[test]
    fn test_to_error_response_serializes() {
        let result: Result<(), AppError> = Err(AppError::Cancelled);
        let message = result.to_error_response().unwrap_err();
        let parsed: ErrorResponse = serde_json::from_str(&message).unwrap();
        assert_eq!(parsed.error_type, ErrorType::Cancelled);
    }
}

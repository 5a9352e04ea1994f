// src/error.rs
// Standardized error type for the API boundary

use serde::Serialize;
use thiserror::Error;

/// Status used when a failure carries no HTTP response
pub const DEFAULT_ERROR_STATUS: u16 = 500;

/// Status reported for client-side validation failures
pub const VALIDATION_STATUS: u16 = 400;

/// Fallback message when nothing better can be extracted from a failure
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Every failure surfaced by the API client.
///
/// Validation failures are raised before any request is sent; network
/// failures cover transport errors, timeouts, non-2xx responses and
/// undecodable payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("network error ({status}): {message}")]
    Network { message: String, status: u16 },
}

/// Convenience type alias for Result using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn network(msg: impl Into<String>, status: u16) -> Self {
        ApiError::Network {
            message: msg.into(),
            status,
        }
    }

    /// Human readable message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg) => msg,
            ApiError::Network { message, .. } => message,
        }
    }

    /// HTTP-like status code
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Validation(_) => VALIDATION_STATUS,
            ApiError::Network { status, .. } => *status,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    /// Uniform `{message, status}` shape for callers that render errors
    pub fn to_standard(&self) -> StandardError {
        StandardError {
            message: self.message().to_string(),
            status: self.status(),
        }
    }
}

/// Serializable view of an [`ApiError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardError {
    pub message: String,
    pub status: u16,
}

impl From<&ApiError> for StandardError {
    fn from(err: &ApiError) -> Self {
        err.to_standard()
    }
}

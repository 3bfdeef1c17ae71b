//! API error types for the Ambar client.

use thiserror::Error;

/// Errors that can occur when talking to the Ambar web API.
///
/// Every failure the UI sees is a single "request failed" kind; the variants
/// here only exist so the log line and the toast can say something useful.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected our credentials.
    #[error("Authentication failed: check your email and token")]
    Unauthorized,

    /// The user lacks access to the resource.
    #[error("Permission denied: you don't have access to this resource")]
    Forbidden,

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Backend returned a 5xx.
    #[error("Ambar server error: {0}")]
    ServerError(String),

    /// A status code the endpoint does not treat as success.
    #[error("Unexpected HTTP {status}: {context}")]
    UnexpectedStatus {
        /// The HTTP status code.
        status: u16,
        /// The request URL or backend message.
        context: String,
    },

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body of a success response could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Keyring error when storing/retrieving tokens.
    #[error("Keyring error: {0}")]
    Keyring(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            other => ApiError::UnexpectedStatus {
                status: other,
                context: context.to_string(),
            },
        }
    }
}

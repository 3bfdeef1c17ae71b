//! Centralized error types for LazyAmbar.
//!
//! Aggregates configuration and API failures into one type that knows how
//! to describe itself to the user.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// A request failed in a background task. Only the message survives the
    /// channel.
    #[error("{context}: {message}")]
    Request {
        /// The operation that failed (e.g. "addTagToFile").
        context: String,
        /// The error message from the task.
        message: String,
    },

    /// IO errors (file system, terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// A failed background request.
    pub fn request(context: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Request {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(ConfigError::ProfileNotFound(name)) => {
                format!("Profile '{}' not found.", name)
            }
            AppError::Config(ConfigError::ValidationError(msg)) => {
                format!("Configuration error: {}", msg)
            }
            AppError::Config(_) => {
                "Could not load configuration. Please check the file format and permissions."
                    .to_string()
            }
            AppError::Api(ApiError::Unauthorized) => {
                "Authentication failed. Please check your email and token.".to_string()
            }
            AppError::Api(ApiError::Network(_)) => {
                "Connection failed. Please check the backend URL.".to_string()
            }
            AppError::Api(e) => e.to_string(),
            AppError::Request { message, .. } => format!("Request failed: {}", message),
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
        }
    }

    /// Critical errors are shown until dismissed instead of as a toast.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Api(ApiError::Unauthorized) | AppError::Io(_)
        )
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

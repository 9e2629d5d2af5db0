//! # Service Error Types
//!
//! Typed error handling for the FullyBooked API.
//! Store and provider operations return `Result<T, ServiceError>`.
//!
//! Callers only ever see [`ServiceError::public_message`]; the `Display`
//! output carries the downstream detail and is meant for the log.

use thiserror::Error;

/// Generic body for store failures.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Generic body for provider failures.
pub const PAYMENT_FAILED: &str = "Payment intent creation failed";

/// Core error type for all handler operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration errors (missing secrets, malformed URLs)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing or invalid required request parameter
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Data store failure (connectivity, malformed query, decode)
    #[error("Database error: {0}")]
    Database(String),

    /// Payment provider rejected the request
    #[error("Provider error [{provider}] (HTTP {status}): {message}")]
    Provider {
        provider: String,
        status: u16,
        message: String,
    },

    /// Network/HTTP error communicating with the provider
    #[error("Network error: {0}")]
    Network(String),
}

impl ServiceError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::InvalidRequest(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Configuration(_)
            | ServiceError::Database(_)
            | ServiceError::Provider { .. }
            | ServiceError::Network(_) => 500,
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::InvalidRequest(message) | ServiceError::NotFound(message) => {
                message.clone()
            }
            ServiceError::Provider { .. } | ServiceError::Network(_) => PAYMENT_FAILED.to_string(),
            ServiceError::Configuration(_) | ServiceError::Database(_) => {
                INTERNAL_SERVER_ERROR.to_string()
            }
        }
    }

    /// Returns true for failures of an external collaborator
    pub fn is_downstream(&self) -> bool {
        self.status_code() >= 500
    }
}

/// Result type alias for handler operations
pub type ServiceResult<T> = Result<T, ServiceError>;

//! Forage error types

use std::time::Duration;

/// Forage error types
#[derive(Debug, thiserror::Error)]
pub enum ForageError {
    // Network/search errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    // Input errors
    #[error("invalid ingredient '{0}'")]
    InvalidIngredient(String),

    #[error("no ingredients given")]
    EmptyIngredients,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Cache storage errors
    #[error("cache storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ForageError {
    /// Whether this error is transient and worth retrying.
    ///
    /// Transient: network-level failures, rate limits, and server-side
    /// (5xx) API errors. Everything else is permanent: bad input, auth
    /// failures and 4xx responses won't improve on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            ForageError::Http(_) => true,
            ForageError::RateLimited { .. } => true,
            ForageError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Provider-suggested retry delay, if any.
    ///
    /// Only `RateLimited` errors carry a hint (from the `Retry-After`
    /// response header).
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ForageError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for forage operations
pub type Result<T> = std::result::Result<T, ForageError>;

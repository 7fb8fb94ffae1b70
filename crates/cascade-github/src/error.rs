//! Gateway error types.

use thiserror::Error;

/// Errors that can occur when talking to the remote project store.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned 429, or 403 with an exhausted rate-limit budget.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The token lacks access to the requested resource.
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// The GraphQL layer reported errors for the operation.
    #[error("GraphQL error: {}", messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// A queried object does not exist or is not visible to the token.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl GatewayError {
    /// Map a transport failure, separating timeouts from other errors.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else {
            Self::Http(error)
        }
    }

    /// Failures worth another attempt: timeouts, connection problems,
    /// server errors, and rate limiting.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::RateLimited { .. } => true,
            Self::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::Api { status, .. } => *status >= 500,
            Self::Forbidden { .. }
            | Self::GraphQl { .. }
            | Self::NotFound { .. }
            | Self::Parse(_) => false,
        }
    }

    /// The store refused one operation; other operations may still succeed.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::GraphQl { .. } | Self::NotFound { .. })
    }
}

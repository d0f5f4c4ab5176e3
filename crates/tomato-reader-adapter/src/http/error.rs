/*
[INPUT]:  Error sources (HTTP, API, signing, serialization, URL)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the reader adapter
#[derive(Error, Debug)]
pub enum ReaderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status or a non-zero envelope code
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Request could not be signed or decorated; nothing was sent
    #[error("Request signing failed: {message}")]
    Signing { message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Connection timeout
    #[error("Connection timeout after {duration}s")]
    Timeout { duration: u64 },
}

impl ReaderError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            ReaderError::Http(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            ReaderError::Api { code, .. } => *code == 429 || (500..600).contains(code),
            ReaderError::Timeout { .. } | ReaderError::InvalidResponse(_) => true,
            _ => false,
        }
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            ReaderError::Api { code: 429, .. } => Some(2),
            ReaderError::Timeout { .. } => Some(1),
            _ => None,
        }
    }

    /// Check if the request never left the process because signing failed
    pub fn is_signing_error(&self) -> bool {
        matches!(self, ReaderError::Signing { .. })
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        ReaderError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        ReaderError::Signing {
            message: message.into(),
        }
    }
}

/// Result type alias for reader operations
pub type Result<T> = std::result::Result<T, ReaderError>;

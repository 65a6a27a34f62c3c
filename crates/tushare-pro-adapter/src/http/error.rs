/*
[INPUT]:  Error sources (transport, JSON parsing, remote rejection, session state)
[OUTPUT]: Structured error type shared by both clients
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or changing error messages
*/

use thiserror::Error;

/// Main error type for the Tushare Pro adapter
#[derive(Error, Debug)]
pub enum TushareError {
    /// The server answered with a non-zero code; displays the server message verbatim
    #[error("{message}")]
    Api { code: i64, message: String },

    /// HTTP transport failed (connect, DNS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON for the envelope
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Successful code but unusable payload
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Session-dependent operation before any session exists
    #[error("HTTP session not initialized")]
    SessionNotInitialized,

    /// Query issued on a client whose session was closed
    #[error("HTTP session is closed")]
    SessionClosed,
}

impl TushareError {
    /// Check if the server rejected the request
    pub fn is_api_error(&self) -> bool {
        matches!(self, TushareError::Api { .. })
    }

    /// Check if the failure came from the HTTP transport
    pub fn is_transport_error(&self) -> bool {
        matches!(self, TushareError::Http(_))
    }

    /// Check if the error reflects async session misuse
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            TushareError::SessionNotInitialized | TushareError::SessionClosed
        )
    }

    /// Server code of an API rejection
    pub fn api_code(&self) -> Option<i64> {
        match self {
            TushareError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type alias for Tushare Pro operations
pub type Result<T> = std::result::Result<T, TushareError>;

//! Anchor error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnchorError {
    /// stellar.toml missing, unreadable, or lacking a required entry.
    #[error("discovery failed: {0}")]
    Discovery(String),

    /// Challenge fetch, validation, or token exchange failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("asset {0} is not supported by the anchor")]
    UnsupportedAsset(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    /// The anchor refused the request; `reason` is its message verbatim.
    #[error("transfer rejected (HTTP {status}): {reason}")]
    Transfer { status: u16, reason: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be constructed.
    #[error("http client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for AnchorError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AnchorError::Network(format!("request timed out: {e}"))
        } else if e.is_connect() {
            AnchorError::Network(format!("connection failed: {e}"))
        } else {
            AnchorError::Network(e.to_string())
        }
    }
}

//! Errors at the message API boundary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("message API base URL is not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

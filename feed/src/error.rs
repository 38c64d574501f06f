//! Feed error types

use sait_economics::EconomicsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("Snapshot provider not configured: {0}")]
    NotConfigured(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetched state rejected: {0}")]
    InvalidState(#[from] EconomicsError),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout
        } else if err.is_decode() {
            FeedError::Decode(err.to_string())
        } else {
            FeedError::Http(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;

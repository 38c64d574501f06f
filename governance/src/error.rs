//! Governance error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GovernanceError {
    #[error("Failed to read grant records: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse grant records: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid grant record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, GovernanceError>;

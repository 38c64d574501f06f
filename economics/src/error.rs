//! Economics error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EconomicsError {
    /// Inputs that would make the arithmetic meaningless
    #[error("Invalid ecosystem state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, EconomicsError>;

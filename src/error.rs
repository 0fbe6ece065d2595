//! Error types for the Pig simulator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PigError {
    #[error("Strategy returned dice count {0} outside [0, 10]")]
    DiceCountOutOfRange(u8),

    #[error("Number of simulations must be greater than 0 (got {0})")]
    InvalidSimulationCount(usize),

    #[error("Invalid game configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid die face {0} (expected 1-6)")]
    InvalidFace(u8),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PigError {
    fn from(err: serde_json::Error) -> Self {
        PigError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PigError>;

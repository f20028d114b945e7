//! Error types for the playmat engine

use crate::core::InstanceId;
use crate::zones::Zone;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaymatError {
    /// The intent referenced a card that is not where the caller expected it
    /// (usually a stale UI event).
    #[error("Card {id} not found in {zone:?}")]
    NotFound { id: InstanceId, zone: Zone },

    /// The operation would duplicate or orphan a card, build a two-level
    /// stack, or otherwise break zone bookkeeping.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Library is empty, no cards to draw")]
    EmptyLibrary,

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl PlaymatError {
    pub fn not_found(id: InstanceId, zone: Zone) -> Self {
        PlaymatError::NotFound { id, zone }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        PlaymatError::InvariantViolation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlaymatError::NotFound { .. })
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, PlaymatError::InvariantViolation(_))
    }

    pub fn is_empty_library(&self) -> bool {
        matches!(self, PlaymatError::EmptyLibrary)
    }
}

pub type Result<T> = std::result::Result<T, PlaymatError>;

//! Error types for the Room actor.

use thiserror::Error;

/// Errors that can occur during room operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RoomError {
    /// The requested room does not exist.
    #[error("Room not found: {0}")]
    NotFound(String),

    /// The room is already occupied by another reservation.
    #[error("Room unavailable: {0}")]
    Unavailable(String),

    /// The room data provided is invalid.
    #[error("Room validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for RoomError {
    fn from(msg: String) -> Self {
        RoomError::ActorCommunicationError(msg)
    }
}

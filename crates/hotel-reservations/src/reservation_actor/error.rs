//! Error types for reservation operations.

use crate::client_actor::ClientError;
use crate::room_actor::RoomError;
use thiserror::Error;

/// Errors returned by the Reservation Engine and the Reservation Store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReservationError {
    /// Dates, price or client list failed validation. Nothing was changed.
    #[error("Reservation validation error: {0}")]
    ValidationError(String),

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// The room is already occupied.
    #[error("Room unavailable: {0}")]
    RoomUnavailable(String),

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Reservation not found: {0}")]
    NotFound(String),

    /// The record kept changing under an edit, even after one retry.
    #[error("Concurrency conflict on {0}")]
    ConcurrencyConflict(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ReservationError {
    fn from(msg: String) -> Self {
        ReservationError::ActorCommunicationError(msg)
    }
}

impl From<RoomError> for ReservationError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::NotFound(id) => ReservationError::RoomNotFound(id),
            RoomError::Unavailable(id) => ReservationError::RoomUnavailable(id),
            RoomError::ValidationError(msg) => ReservationError::ValidationError(msg),
            RoomError::ActorCommunicationError(msg) => {
                ReservationError::ActorCommunicationError(msg)
            }
        }
    }
}

impl From<ClientError> for ReservationError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(id) => ReservationError::ClientNotFound(id),
            ClientError::ValidationError(msg) => ReservationError::ValidationError(msg),
            ClientError::ActorCommunicationError(msg) => {
                ReservationError::ActorCommunicationError(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_errors_keep_their_meaning() {
        assert_eq!(
            ReservationError::from(RoomError::Unavailable("room_4".into())),
            ReservationError::RoomUnavailable("room_4".into())
        );
        assert_eq!(
            ReservationError::from(RoomError::NotFound("room_9".into())),
            ReservationError::RoomNotFound("room_9".into())
        );
    }

    #[test]
    fn test_missing_client_maps_to_client_not_found() {
        assert_eq!(
            ReservationError::from(ClientError::NotFound("client_2".into())),
            ReservationError::ClientNotFound("client_2".into())
        );
    }
}

//! Custom actions for the Room actor.
//!
//! Availability is changed only through these actions, so the check and the
//! flip happen in the same actor turn. The variants can only be constructed
//! inside this crate.

/// Availability transitions of a [`Room`](crate::model::Room).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomAction {
    /// `Free` → `Occupied`. Fails with
    /// [`RoomError::Unavailable`](super::RoomError::Unavailable) if already occupied.
    #[non_exhaustive]
    Reserve,
    /// `Occupied` → `Free`. Releasing a free room is a no-op.
    #[non_exhaustive]
    Release,
}

/// Results from RoomActions - variants match 1:1 with RoomAction
#[derive(Debug, Clone, PartialEq)]
pub enum RoomActionResult {
    /// The room as it was left by the reservation.
    Reserve(crate::model::Room),
    /// `true` if the room was occupied and is now free.
    Release(bool),
}

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl From<u32> for RoomId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Free,
    Occupied,
}

/// A bookable hotel room.
///
/// # Actor Framework
/// Managed by the Room Registry actor; see
/// [`impl ActorEntity for Room`](#impl-ActorEntity-for-Room).
///
/// Availability is not part of [`RoomCreate`] or [`RoomUpdate`]. It starts
/// `Free` and only moves through the registry's `reserve`/`release` actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub room_type: String,
    pub price_per_adult: f64,
    pub price_per_child: f64,
    pub(crate) availability: Availability,
}

impl Room {
    pub fn new(
        id: RoomId,
        room_type: impl Into<String>,
        price_per_adult: f64,
        price_per_child: f64,
    ) -> Self {
        Self {
            id,
            room_type: room_type.into(),
            price_per_adult,
            price_per_child,
            availability: Availability::Free,
        }
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn is_free(&self) -> bool {
        self.availability == Availability::Free
    }
}

/// Payload for registering a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub room_type: String,
    pub price_per_adult: f64,
    pub price_per_child: f64,
}

/// Payload for editing a room's description and prices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub room_type: Option<String>,
    pub price_per_adult: Option<f64>,
    pub price_per_child: Option<f64>,
}

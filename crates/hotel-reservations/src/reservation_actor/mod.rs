//! # Reservation Actor
//!
//! Backs the Reservation Store. Each [`Reservation`] owns its client links,
//! so inserting or removing a reservation stores or drops the links in the
//! same actor turn.
//!
//! ## Context
//!
//! The actor is run with a [`RoomRegistry`](crate::clients::RoomRegistry) as
//! context. Deleting a reservation calls
//! [`RoomRegistry::release`](crate::clients::RoomRegistry::release) from the
//! `on_delete` hook, and the record is removed only after the room is free
//! again.

pub mod entity;
pub mod error;

pub use entity::ReservationAction;
pub use error::*;

use crate::clients::ReservationStore;
use crate::model::Reservation;
use actor_framework::ResourceActor;

/// Creates a new Reservation actor and its store client.
///
/// The returned actor must be started with `actor.run(room_registry)`.
pub fn new(buffer_size: usize) -> (ResourceActor<Reservation>, ReservationStore) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ReservationStore::new(generic_client))
}

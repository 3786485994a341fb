//! # Room Actor
//!
//! The Room Registry's backing actor. It owns every [`Room`] and is the only
//! place availability changes.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Room`]
//! - [`actions`] - [`RoomAction::Reserve`] and [`RoomAction::Release`]
//! - [`error`] - [`RoomError`]
//! - [`new()`] - Factory function that creates the actor and its [`RoomRegistry`]
//!
//! ## Atomicity
//!
//! `Reserve` checks `Free` and flips to `Occupied` inside one actor turn. Two
//! concurrent reservations of the same room are queued on the actor's channel
//! and the second one observes `Occupied`.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::RoomRegistry;
use crate::model::Room;
use actor_framework::ResourceActor;

/// Creates a new Room actor and its registry client.
pub fn new(buffer_size: usize) -> (ResourceActor<Room>, RoomRegistry) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, RoomRegistry::new(generic_client))
}

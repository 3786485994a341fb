//! # Client Actor
//!
//! Holds the hotel's clients. Reservations only reference them by
//! [`ClientId`](crate::model::ClientId); the engine reads them to resolve ids
//! and to address confirmation notices.

pub mod entity;
pub mod error;

pub use entity::ClientAction;
pub use error::*;

use crate::clients::ClientDirectory;
use crate::model::Client;
use actor_framework::ResourceActor;

/// Creates a new Client actor and its directory client.
pub fn new(buffer_size: usize) -> (ResourceActor<Client>, ClientDirectory) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ClientDirectory::new(generic_client))
}

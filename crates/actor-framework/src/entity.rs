//! # ActorEntity Trait
//!
//! The contract a resource (room, client, reservation, …) implements to be
//! managed by a [`ResourceActor`](crate::ResourceActor). Associated types pin
//! down the id, the create/update DTOs, the custom actions, the injected
//! context and the error type, so a `RoomCreate` can never be sent to the
//! reservation actor.
//!
//! # Hooks
//! - [`ActorEntity::on_create`] and [`ActorEntity::on_delete`] default to `Ok(())`.
//! - [`ActorEntity::on_update`] and [`ActorEntity::handle_action`] must be written.
//!
//! Update and action hooks run against a staged copy of the entity. The actor
//! commits the copy only when the hook returns `Ok`, so an `Err` never leaves a
//! half-applied mutation behind.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are async so they can talk to other actors. The `Context` is handed to
/// the actor's `run()` rather than `new()`, which lets actors be created first
/// and wired together afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Unique identifier. Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `Reserve`, `Release`).
    type Action: Send + Sync + Debug;

    /// Result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into every hook. Use `()` if none.
    type Context: Send + Sync;

    /// One error enum per actor, shared by every hook and action.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its freshly allocated id and the create payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload to a staged copy of the entity.
    async fn on_update(&mut self, update: Self::Update, _ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called before the entity is removed. Returning `Err` vetoes the removal.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom resource-specific action on a staged copy of the entity.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

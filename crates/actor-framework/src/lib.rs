//! # Actor Framework
//!
//! Type-safe resource actors on Tokio. Each resource type gets one
//! [`ResourceActor`] that owns its records and handles CRUD, paging and custom
//! actions one request at a time; callers talk to it through a cloneable
//! [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - the business rules of one resource.
//! 2. **Runtime** ([`ResourceActor`]) - the message loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - typed requests.
//!
//! ## Store semantics
//!
//! - Records keep insertion order; [`ResourceClient::list`] pages in that order
//!   and counts the total in the same turn.
//! - Every record carries a version. [`ResourceClient::fetch`] returns it and
//!   [`ResourceClient::update_if`] rejects a write made against a stale one
//!   with [`FrameworkError::Conflict`].
//! - Update and action hooks mutate a staged copy; nothing is committed when
//!   the hook fails.
//! - `on_delete` runs before removal and can veto it.
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Lamp { id: u32, on: bool }
//! #[derive(Debug)] struct LampCreate;
//! #[derive(Debug)] struct LampUpdate { on: bool }
//! #[derive(Debug)] enum LampAction { Toggle }
//! #[derive(Debug)] struct LampError;
//! impl std::fmt::Display for LampError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "lamp error") }
//! }
//! impl std::error::Error for LampError {}
//!
//! #[async_trait]
//! impl ActorEntity for Lamp {
//!     type Id = u32;
//!     type Create = LampCreate;
//!     type Update = LampUpdate;
//!     type Action = LampAction;
//!     type ActionResult = bool;
//!     type Context = ();
//!     type Error = LampError;
//!
//!     fn from_create_params(id: u32, _: LampCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, on: false })
//!     }
//!     async fn on_update(&mut self, update: LampUpdate, _: &()) -> Result<(), Self::Error> {
//!         self.on = update.on;
//!         Ok(())
//!     }
//!     async fn handle_action(&mut self, action: LampAction, _: &()) -> Result<bool, Self::Error> {
//!         match action {
//!             LampAction::Toggle => { self.on = !self.on; Ok(self.on) }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Lamp>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let lamp = client.create(LampCreate).await.unwrap();
//!     assert!(client.perform_action(lamp.id, LampAction::Toggle).await.unwrap());
//!
//!     let current = client.fetch(lamp.id).await.unwrap().unwrap();
//!     assert_eq!(current.version, 2);
//! }
//! ```

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Page, ResourceRequest, Response, Versioned};

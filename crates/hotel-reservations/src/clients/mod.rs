//! # Domain Clients
//!
//! Typed wrappers around the generic [`ResourceClient`](actor_framework::ResourceClient).
//! Each one implements [`ActorClient`](actor_framework::ActorClient) to inherit
//! `get`, `delete` and `list`, maps [`FrameworkError`](actor_framework::FrameworkError)
//! into its actor's error enum and adds the domain operations on top.

pub mod client_directory;
pub mod reservation_store;
pub mod room_registry;

pub use client_directory::ClientDirectory;
pub use reservation_store::ReservationStore;
pub use room_registry::RoomRegistry;

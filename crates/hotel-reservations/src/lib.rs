//! # Hotel Reservations
//!
//! Room booking on top of the actor framework.
//!
//! - [`model`]: rooms, clients, reservations and their payloads.
//! - [`room_actor`], [`client_actor`], [`reservation_actor`]: one actor per
//!   resource type, each the single owner of its records.
//! - [`clients`]: the typed handles ([`RoomRegistry`](clients::RoomRegistry),
//!   [`ClientDirectory`](clients::ClientDirectory),
//!   [`ReservationStore`](clients::ReservationStore)).
//! - [`engine`]: the [`ReservationEngine`](engine::ReservationEngine), entry
//!   point for create, edit, delete and list.
//! - [`notifier`]: booking confirmations, delivered off the commit path.
//! - [`lifecycle`]: [`HotelSystem`](lifecycle::HotelSystem) and its config.

pub mod client_actor;
pub mod clients;
pub mod engine;
pub mod lifecycle;
pub mod model;
pub mod notifier;
pub mod reservation_actor;
pub mod room_actor;

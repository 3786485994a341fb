//! # System Lifecycle
//!
//! [`HotelSystem`] creates the actors, wires them together and stops them.
//!
//! ## Wiring
//!
//! Actors are created first and receive their dependencies when they are
//! started with `run(context)`:
//!
//! ```rust,ignore
//! let (room_actor, rooms) = room_actor::new(buffer);
//! let (reservation_actor, store) = reservation_actor::new(buffer);
//!
//! tokio::spawn(room_actor.run(()));
//! tokio::spawn(reservation_actor.run(rooms.clone()));
//! ```
//!
//! The dependency graph is acyclic (reservations depend on rooms, rooms on
//! nothing), so every actor stops once the handles pointing at it are gone.
//!
//! ## Graceful Shutdown
//!
//! 1. Drop all clients. The request channels close.
//! 2. Each actor finishes the requests already queued and logs `Shutdown`.
//! 3. The engine's notification queue closes with it, and the dispatcher
//!    delivers what is left before stopping.
//!
//! ## Configuration
//!
//! [`HotelConfig::from_env`] reads `HOTEL_*` variables on top of the defaults.
//! Log filtering is controlled by `RUST_LOG`; see
//! [`actor_framework::tracing`].

pub mod config;
pub mod hotel_system;

pub use config::*;
pub use hotel_system::*;

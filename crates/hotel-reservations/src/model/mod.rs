//! Plain data types for rooms, clients and reservations, with their
//! create/update payloads.

pub mod client;
pub mod reservation;
pub mod room;

pub use client::*;
pub use reservation::*;
pub use room::*;

//! Builds, wires and stops every actor of the hotel.

use super::HotelConfig;
use crate::clients::{ClientDirectory, RoomRegistry};
use crate::engine::ReservationEngine;
use crate::notifier::{DispatchStats, NotificationDispatcher, Notifier};
use crate::{client_actor, reservation_actor, room_actor};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// The running system.
///
/// The room, client and reservation actors each run on their own task. The
/// reservation actor gets a [`RoomRegistry`] clone as context so that deleting
/// a reservation can free its room.
pub struct HotelSystem {
    pub engine: ReservationEngine,
    pub rooms: RoomRegistry,
    pub clients: ClientDirectory,
    actor_handles: Vec<JoinHandle<()>>,
    dispatcher_handle: JoinHandle<DispatchStats>,
}

impl HotelSystem {
    /// Starts every actor and the notification dispatcher.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: HotelConfig, notifier: Arc<dyn Notifier>) -> Self {
        // 1. Create actors (no dependencies yet)
        let (room_actor, rooms) = room_actor::new(config.actor_buffer);
        let (client_actor, clients) = client_actor::new(config.actor_buffer);
        let (reservation_actor, store) = reservation_actor::new(config.actor_buffer);
        let (dispatcher, notifications) = NotificationDispatcher::new(
            config.notification_capacity,
            notifier,
            config.notification_timeout,
        );

        // 2. Start them with their context injected
        let actor_handles = vec![
            tokio::spawn(room_actor.run(())),
            tokio::spawn(client_actor.run(())),
            tokio::spawn(reservation_actor.run(rooms.clone())),
        ];
        let dispatcher_handle = tokio::spawn(dispatcher.run());

        let engine = ReservationEngine::new(
            rooms.clone(),
            clients.clone(),
            store,
            notifications,
            config.mail,
        );
        info!(actor_buffer = config.actor_buffer, "Hotel system started");

        Self {
            engine,
            rooms,
            clients,
            actor_handles,
            dispatcher_handle,
        }
    }

    /// Stops the system once all outstanding work is done.
    ///
    /// Every clone of the engine and the clients handed out by this system
    /// must be dropped first, otherwise the actors keep waiting for requests.
    /// Queued notifications are still delivered before this returns.
    pub async fn shutdown(self) -> Result<DispatchStats, String> {
        info!("Shutting down hotel system");
        drop(self.engine);
        drop(self.rooms);
        drop(self.clients);

        // The reservation actor holds the last RoomRegistry clone, so the
        // room actor stops after it.
        for handle in self.actor_handles {
            handle.await.map_err(|e| e.to_string())?;
        }
        let stats = self.dispatcher_handle.await.map_err(|e| e.to_string())?;
        info!(
            delivered = stats.delivered,
            failed = stats.failed,
            "Hotel system stopped"
        );
        Ok(stats)
    }
}

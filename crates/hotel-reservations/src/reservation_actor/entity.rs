//! [`ActorEntity`] implementation for [`Reservation`].

use super::ReservationError;
use crate::clients::RoomRegistry;
use crate::model::{Reservation, ReservationCreate, ReservationId, ReservationUpdate};
use crate::room_actor::RoomError;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Reservations have no custom actions; their lifecycle is create, edit and delete.
#[derive(Debug)]
pub enum ReservationAction {}

#[async_trait]
impl ActorEntity for Reservation {
    type Id = ReservationId;
    type Create = ReservationCreate;
    type Update = ReservationUpdate;
    type Action = ReservationAction;
    type ActionResult = ();
    type Context = RoomRegistry;
    type Error = ReservationError;

    fn from_create_params(id: ReservationId, params: ReservationCreate) -> Result<Self, Self::Error> {
        Reservation::new(id, params)
    }

    async fn on_create(&mut self, _rooms: &RoomRegistry) -> Result<(), Self::Error> {
        debug!(reservation_id = %self.id, room_id = %self.room_id, "Persisting reservation");
        Ok(())
    }

    /// Replaces dates and amenities. Room, user, price and client links stay.
    async fn on_update(
        &mut self,
        update: ReservationUpdate,
        _rooms: &RoomRegistry,
    ) -> Result<(), Self::Error> {
        update.validate()?;
        self.check_in = update.check_in;
        self.check_out = update.check_out;
        self.has_breakfast = update.has_breakfast;
        self.is_all_inclusive = update.is_all_inclusive;
        Ok(())
    }

    /// Frees the room before the record goes away. If the room cannot be
    /// released the reservation is kept.
    async fn on_delete(&self, rooms: &RoomRegistry) -> Result<(), Self::Error> {
        match rooms.release(self.room_id).await {
            Ok(()) => {
                info!(reservation_id = %self.id, room_id = %self.room_id, "Room released");
                Ok(())
            }
            // A room that no longer exists has nothing left to free.
            Err(RoomError::NotFound(_)) => {
                warn!(reservation_id = %self.id, room_id = %self.room_id, "Room already gone");
                Ok(())
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn handle_action(
        &mut self,
        action: ReservationAction,
        _rooms: &RoomRegistry,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}

//! [`ActorEntity`] implementation for [`Room`].

use super::actions::{RoomAction, RoomActionResult};
use super::RoomError;
use crate::model::{Availability, Room, RoomCreate, RoomId, RoomUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn check_price(label: &str, price: f64) -> Result<(), RoomError> {
    if price >= 0.0 {
        Ok(())
    } else {
        Err(RoomError::ValidationError(format!("{label} must not be negative, got {price}")))
    }
}

fn check_room_type(room_type: &str) -> Result<(), RoomError> {
    if room_type.trim().is_empty() {
        return Err(RoomError::ValidationError("room type is required".to_string()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Room {
    type Id = RoomId;
    type Create = RoomCreate;
    type Update = RoomUpdate;
    type Action = RoomAction;
    type ActionResult = RoomActionResult;
    type Context = ();
    type Error = RoomError;

    fn from_create_params(id: RoomId, params: RoomCreate) -> Result<Self, Self::Error> {
        check_room_type(&params.room_type)?;
        check_price("price per adult", params.price_per_adult)?;
        check_price("price per child", params.price_per_child)?;
        Ok(Self::new(
            id,
            params.room_type,
            params.price_per_adult,
            params.price_per_child,
        ))
    }

    /// Updates the description and prices. Availability is untouched.
    async fn on_update(&mut self, update: RoomUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(room_type) = update.room_type {
            check_room_type(&room_type)?;
            self.room_type = room_type;
        }
        if let Some(price) = update.price_per_adult {
            check_price("price per adult", price)?;
            self.price_per_adult = price;
        }
        if let Some(price) = update.price_per_child {
            check_price("price per child", price)?;
            self.price_per_child = price;
        }
        Ok(())
    }

    /// An occupied room belongs to a reservation and cannot be removed.
    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        match self.availability {
            Availability::Free => Ok(()),
            Availability::Occupied => Err(RoomError::Unavailable(self.id.to_string())),
        }
    }

    async fn handle_action(
        &mut self,
        action: RoomAction,
        _ctx: &(),
    ) -> Result<RoomActionResult, Self::Error> {
        match action {
            RoomAction::Reserve => match self.availability {
                Availability::Free => {
                    self.availability = Availability::Occupied;
                    Ok(RoomActionResult::Reserve(self.clone()))
                }
                Availability::Occupied => Err(RoomError::Unavailable(self.id.to_string())),
            },
            RoomAction::Release => {
                let was_occupied = self.availability == Availability::Occupied;
                self.availability = Availability::Free;
                Ok(RoomActionResult::Release(was_occupied))
            }
        }
    }
}

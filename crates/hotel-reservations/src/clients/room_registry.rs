//! # Room Registry
//!
//! High-level API over the `Room` actor. `reserve` and `release` are the only
//! way to change a room's availability, and only the engine and the
//! reservation actor can call them. Deleting an occupied room is refused.
use crate::model::{Room, RoomCreate, RoomId, RoomUpdate};
use crate::room_actor::{RoomAction, RoomActionResult, RoomError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Room actor.
#[derive(Clone)]
pub struct RoomRegistry {
    inner: ResourceClient<Room>,
}

impl RoomRegistry {
    pub fn new(inner: ResourceClient<Room>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Room> for RoomRegistry {
    type Error = RoomError;

    fn inner(&self) -> &ResourceClient<Room> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<RoomError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => RoomError::NotFound(id),
            Err(other) => RoomError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl RoomRegistry {
    #[instrument(skip(self))]
    pub async fn create_room(&self, params: RoomCreate) -> Result<Room, RoomError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Changes the description or prices. Availability cannot be set here.
    #[instrument(skip(self))]
    pub async fn update_room(&self, id: RoomId, update: RoomUpdate) -> Result<Room, RoomError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Every room, in registration order.
    #[instrument(skip(self))]
    pub async fn list_rooms(&self) -> Result<Vec<Room>, RoomError> {
        Ok(self.list(0, usize::MAX).await?.items)
    }

    /// Rooms that are currently `Free`, in registration order.
    #[instrument(skip(self))]
    pub async fn list_available(&self) -> Result<Vec<Room>, RoomError> {
        let rooms = self.list_rooms().await?;
        Ok(rooms.into_iter().filter(Room::is_free).collect())
    }

    /// Marks a free room as occupied and returns it.
    ///
    /// Fails with [`RoomError::Unavailable`] when the room is already occupied
    /// and with [`RoomError::NotFound`] when it does not exist.
    #[instrument(skip(self))]
    pub(crate) async fn reserve(&self, id: RoomId) -> Result<Room, RoomError> {
        debug!("Reserving room");
        match self.inner.perform_action(id, RoomAction::Reserve).await {
            Ok(RoomActionResult::Reserve(room)) => Ok(room),
            Ok(_) => unreachable!("Reserve action must return Reserve result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Marks a room as free. Releasing a free room succeeds and changes nothing.
    #[instrument(skip(self))]
    pub(crate) async fn release(&self, id: RoomId) -> Result<(), RoomError> {
        debug!("Releasing room");
        match self.inner.perform_action(id, RoomAction::Release).await {
            Ok(RoomActionResult::Release(was_occupied)) => {
                debug!(was_occupied, "Room released");
                Ok(())
            }
            Ok(_) => unreachable!("Release action must return Release result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_reserve_returns_occupied_room() {
        let (client, mut receiver) = create_mock_client::<Room>(10);
        let registry = RoomRegistry::new(client);

        let reserve_task = tokio::spawn(async move { registry.reserve(RoomId(3)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, RoomId(3));
        assert_eq!(action, RoomAction::Reserve);

        let mut room = Room::new(RoomId(3), "Suite", 150.0, 75.0);
        room.availability = crate::model::Availability::Occupied;
        responder
            .send(Ok(RoomActionResult::Reserve(room.clone())))
            .unwrap();

        assert_eq!(reserve_task.await.unwrap().unwrap(), room);
    }

    #[tokio::test]
    async fn test_reserve_recovers_typed_unavailable_error() {
        let (client, mut receiver) = create_mock_client::<Room>(10);
        let registry = RoomRegistry::new(client);

        let reserve_task = tokio::spawn(async move { registry.reserve(RoomId(1)).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                RoomError::Unavailable("room_1".into()),
            ))))
            .unwrap();

        assert_eq!(
            reserve_task.await.unwrap(),
            Err(RoomError::Unavailable("room_1".into()))
        );
    }

    #[tokio::test]
    async fn test_release_of_unknown_room_is_not_found() {
        let (client, mut receiver) = create_mock_client::<Room>(10);
        let registry = RoomRegistry::new(client);

        let release_task = tokio::spawn(async move { registry.release(RoomId(42)).await });

        let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(id, RoomId(42));
        assert_eq!(action, RoomAction::Release);
        responder
            .send(Err(FrameworkError::NotFound("room_42".into())))
            .unwrap();

        assert_eq!(
            release_task.await.unwrap(),
            Err(RoomError::NotFound("room_42".into()))
        );
    }

    #[tokio::test]
    async fn test_closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Room>(1);
        drop(receiver);
        let registry = RoomRegistry::new(client);

        let err = registry.reserve(RoomId(1)).await.unwrap_err();
        assert!(matches!(err, RoomError::ActorCommunicationError(_)));
    }
}

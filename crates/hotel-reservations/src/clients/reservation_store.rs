//! # Reservation Store
//!
//! High-level API over the `Reservation` actor. Reads return the record
//! together with its version so that edits can be written conditionally.
use crate::model::{Reservation, ReservationCreate, ReservationId, ReservationUpdate};
use crate::reservation_actor::ReservationError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient, Versioned};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Reservation actor.
#[derive(Clone)]
pub struct ReservationStore {
    inner: ResourceClient<Reservation>,
}

impl ReservationStore {
    pub fn new(inner: ResourceClient<Reservation>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Reservation> for ReservationStore {
    type Error = ReservationError;

    fn inner(&self) -> &ResourceClient<Reservation> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<ReservationError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ReservationError::NotFound(id),
            Err(FrameworkError::Conflict { id, .. }) => ReservationError::ConcurrencyConflict(id),
            Err(other) => ReservationError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ReservationStore {
    /// Inserts the reservation and its client links.
    #[instrument(skip(self))]
    pub async fn create(&self, params: ReservationCreate) -> Result<Reservation, ReservationError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// The stored reservation and its current version.
    #[instrument(skip(self))]
    pub async fn find_by_id(
        &self,
        id: ReservationId,
    ) -> Result<Option<Versioned<Reservation>>, ReservationError> {
        debug!("Sending request");
        self.inner.fetch(id).await.map_err(Self::map_error)
    }

    /// Writes `update` only if the record is still at `expected_version`.
    /// A stale version fails with [`ReservationError::ConcurrencyConflict`].
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: ReservationId,
        expected_version: u64,
        update: ReservationUpdate,
    ) -> Result<Versioned<Reservation>, ReservationError> {
        debug!("Sending request");
        self.inner
            .update_if(id, expected_version, update)
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;
    use chrono::NaiveDate;

    fn update() -> ReservationUpdate {
        ReservationUpdate {
            check_in: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
            has_breakfast: false,
            is_all_inclusive: true,
        }
    }

    #[tokio::test]
    async fn test_stale_version_maps_to_concurrency_conflict() {
        let mut mock = MockClient::<Reservation>::new();
        mock.expect_update().return_err(FrameworkError::Conflict {
            id: "reservation_1".into(),
            expected: 1,
            actual: 2,
        });
        let store = ReservationStore::new(mock.client());

        let err = store
            .update(ReservationId(1), 1, update())
            .await
            .unwrap_err();
        assert_eq!(err, ReservationError::ConcurrencyConflict("reservation_1".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_delete_of_unknown_reservation_is_not_found() {
        let mut mock = MockClient::<Reservation>::new();
        mock.expect_delete()
            .return_err(FrameworkError::NotFound("reservation_9".into()));
        let store = ReservationStore::new(mock.client());

        let err = store.delete(ReservationId(9)).await.unwrap_err();
        assert_eq!(err, ReservationError::NotFound("reservation_9".into()));
        mock.verify();
    }
}

//! # Reservation Engine
//!
//! Orchestrates create, edit, delete and list across the Room Registry, the
//! Client Directory and the Reservation Store.
//!
//! ## Consistency
//!
//! - **Create** reserves the room first and persists second. If persisting
//!   fails the room is released again before the error is returned. Both
//!   steps and the queueing of confirmations run on a spawned task, so
//!   dropping the caller's future cannot stop the sequence halfway.
//! - **Delete** is a single store request. The reservation's `on_delete` hook
//!   releases the room inside the store's actor turn.
//! - **Edit** is an optimistic write against the version that was read, with
//!   one retry on conflict.
//!
//! Notifications are queued after a successful create, one per distinct
//! client, and delivered by the
//! [`NotificationDispatcher`](crate::notifier::NotificationDispatcher). They
//! never fail a reservation.

use crate::clients::{ClientDirectory, ReservationStore, RoomRegistry};
use crate::model::{
    Client, ClientId, Reservation, ReservationCreate, ReservationId, ReservationPage,
    ReservationSummary, ReservationUpdate,
};
use crate::notifier::{MailConfig, NotificationQueue};
use crate::reservation_actor::ReservationError;
use actor_framework::ActorClient;
use tracing::{debug, error, info, instrument, warn, Instrument};

/// Reservations shown per listing page.
pub const PAGE_SIZE: usize = 10;

/// Number of pages needed for `total` reservations. Zero when there are none.
pub fn pages_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// Clamps a requested page number to `>= 1` and returns it with its offset.
fn page_window(page: i64) -> (usize, usize) {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    (page, (page - 1).saturating_mul(PAGE_SIZE))
}

/// Entry point for every reservation operation.
#[derive(Clone)]
pub struct ReservationEngine {
    rooms: RoomRegistry,
    clients: ClientDirectory,
    store: ReservationStore,
    notifications: NotificationQueue,
    mail: MailConfig,
}

impl ReservationEngine {
    pub fn new(
        rooms: RoomRegistry,
        clients: ClientDirectory,
        store: ReservationStore,
        notifications: NotificationQueue,
        mail: MailConfig,
    ) -> Self {
        Self {
            rooms,
            clients,
            store,
            notifications,
            mail,
        }
    }

    /// Books a room for the given clients.
    ///
    /// On success the room is `Occupied`, the reservation and its client links
    /// are stored, and one confirmation per client is queued. On any error the
    /// room is left as it was.
    #[instrument(skip(self, request), fields(user_id = %request.user_id, room_id = %request.room_id))]
    pub async fn create(&self, request: ReservationCreate) -> Result<Reservation, ReservationError> {
        request.validate()?;
        let clients = self.resolve_clients(&request.client_ids).await?;

        let recipients: Vec<String> = clients.into_iter().map(|c| c.email).collect();
        tokio::spawn(commit(
            self.rooms.clone(),
            self.store.clone(),
            self.notifications.clone(),
            self.mail.clone(),
            request,
            recipients,
        )
        .in_current_span())
        .await
        .map_err(|e| ReservationError::ActorCommunicationError(e.to_string()))?
    }

    /// Changes dates and amenities. The room and clients stay as they are.
    ///
    /// The write is conditional on the version that was read. If another
    /// writer got in first, the record is read again and the write retried
    /// once; a second conflict is returned as
    /// [`ReservationError::ConcurrencyConflict`].
    #[instrument(skip(self, update))]
    pub async fn edit(
        &self,
        id: ReservationId,
        update: ReservationUpdate,
    ) -> Result<Reservation, ReservationError> {
        update.validate()?;

        let current = self.require(id).await?;
        match self.store.update(id, current.version, update.clone()).await {
            Ok(updated) => {
                info!(version = updated.version, "Reservation edited");
                return Ok(updated.value);
            }
            Err(ReservationError::ConcurrencyConflict(_)) => {
                debug!(version = current.version, "Edit lost a race, retrying");
            }
            Err(e) => return Err(e),
        }

        let fresh = self.require(id).await?;
        let updated = self.store.update(id, fresh.version, update).await?;
        info!(version = updated.version, "Reservation edited after retry");
        Ok(updated.value)
    }

    /// Removes the reservation and frees its room.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ReservationId) -> Result<(), ReservationError> {
        self.store.delete(id).await?;
        info!("Reservation deleted");
        Ok(())
    }

    /// One page of reservations in creation order. Pages start at 1; smaller
    /// numbers are treated as 1.
    #[instrument(skip(self))]
    pub async fn list(&self, page: i64) -> Result<ReservationPage, ReservationError> {
        let (current_page, offset) = page_window(page);
        let snapshot = self.store.list(offset, PAGE_SIZE).await?;
        debug!(returned = snapshot.items.len(), total = snapshot.total, "Listed reservations");
        Ok(ReservationPage {
            items: snapshot.items.iter().map(ReservationSummary::from).collect(),
            current_page,
            pages_count: pages_count(snapshot.total),
            total_count: snapshot.total,
        })
    }

    #[instrument(skip(self))]
    pub async fn find(&self, id: ReservationId) -> Result<Option<Reservation>, ReservationError> {
        self.store.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, id: ReservationId) -> Result<bool, ReservationError> {
        Ok(self.store.get(id).await?.is_some())
    }

    async fn require(
        &self,
        id: ReservationId,
    ) -> Result<actor_framework::Versioned<Reservation>, ReservationError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ReservationError::NotFound(id.to_string()))
    }

    /// Looks up each distinct client once, in request order.
    async fn resolve_clients(&self, ids: &[ClientId]) -> Result<Vec<Client>, ReservationError> {
        let mut resolved: Vec<Client> = Vec::with_capacity(ids.len());
        for &id in ids {
            if resolved.iter().any(|c| c.id == id) {
                continue;
            }
            let client = self.clients.require(id).await?;
            resolved.push(client);
        }
        Ok(resolved)
    }
}

/// The part of a create that must not be interrupted: reserve, persist and
/// queue the confirmations.
async fn commit(
    rooms: RoomRegistry,
    store: ReservationStore,
    notifications: NotificationQueue,
    mail: MailConfig,
    request: ReservationCreate,
    recipients: Vec<String>,
) -> Result<Reservation, ReservationError> {
    let reservation = reserve_and_persist(rooms, store, request).await?;
    info!(reservation_id = %reservation.id, clients = recipients.len(), "Reservation created");
    for to in &recipients {
        notifications.enqueue(mail.confirmation(to));
    }
    Ok(reservation)
}

/// Reserve, then persist. Releases the room if persisting fails.
async fn reserve_and_persist(
    rooms: RoomRegistry,
    store: ReservationStore,
    request: ReservationCreate,
) -> Result<Reservation, ReservationError> {
    let room_id = request.room_id;
    rooms.reserve(room_id).await?;

    match store.create(request).await {
        Ok(reservation) => Ok(reservation),
        Err(err) => {
            match rooms.release(room_id).await {
                Ok(()) => warn!(%room_id, error = %err, "Persisting failed, room released"),
                Err(release_err) => error!(
                    %room_id,
                    error = %err,
                    release_error = %release_err,
                    "Persisting failed and room could not be released"
                ),
            }
            Err(err)
        }
    }
}

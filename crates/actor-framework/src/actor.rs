//! # Generic Actor Server
//!
//! [`ResourceActor`] owns the store for one entity type and processes every
//! request for it sequentially on a single Tokio task. That loop is the
//! mutual-exclusion boundary: two requests against the same actor never
//! interleave, so check-then-set operations inside a hook are atomic.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Page, ResourceRequest, Versioned};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A stored entity with its insertion sequence and current version.
struct Slot<T> {
    seq: u64,
    version: u64,
    value: T,
}

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor (server) and a client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a background task.
///
/// # Operations
///
/// * **Create**: allocate the next id, `from_create_params`, `on_create`, insert.
///   Responds with the stored entity.
/// * **Get**: clone of the entity and its version, or `None`.
/// * **Update**: optional version check, `on_update` on a staged copy, commit
///   and bump the version.
/// * **Delete**: `on_delete` (may veto), then remove.
/// * **List**: `offset`/`limit` slice in insertion order plus the total count.
/// * **Action**: `handle_action` on a staged copy, commit and bump the version.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, Slot<T>>,
    order: BTreeMap<u64, T::Id>,
    next_id: u32,
    next_seq: u64,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the request channel capacity; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: BTreeMap::new(),
            next_id: 1,
            next_seq: 0,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "Room" rather than "hotel_reservations::model::room::Room"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.insert(id.clone(), item.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).map(|slot| Versioned {
                        version: slot.version,
                        value: slot.value.clone(),
                    });
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    expected_version,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, ?expected_version, "Update");
                    let Some(slot) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Some(expected) = expected_version {
                        if expected != slot.version {
                            warn!(entity_type, %id, expected, actual = slot.version, "Version conflict");
                            let _ = respond_to.send(Err(FrameworkError::Conflict {
                                id: id.to_string(),
                                expected,
                                actual: slot.version,
                            }));
                            continue;
                        }
                    }
                    let mut staged = slot.value.clone();
                    if let Err(e) = staged.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    slot.value = staged;
                    slot.version += 1;
                    info!(entity_type, %id, version = slot.version, "Updated");
                    let _ = respond_to.send(Ok(Versioned {
                        version: slot.version,
                        value: slot.value.clone(),
                    }));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(slot) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = slot.value.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::List {
                    offset,
                    limit,
                    respond_to,
                } => {
                    let items: Vec<T> = self
                        .order
                        .values()
                        .skip(offset)
                        .take(limit)
                        .filter_map(|id| self.store.get(id))
                        .map(|slot| slot.value.clone())
                        .collect();
                    let total = self.store.len();
                    debug!(entity_type, offset, limit, returned = items.len(), total, "List");
                    let _ = respond_to.send(Ok(Page { items, total }));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(slot) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut staged = slot.value.clone();
                    match staged.handle_action(action, &context).await {
                        Ok(result) => {
                            slot.value = staged;
                            slot.version += 1;
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn insert(&mut self, id: T::Id, value: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, id.clone());
        self.store.insert(
            id,
            Slot {
                seq,
                version: 1,
                value,
            },
        );
    }

    fn remove(&mut self, id: &T::Id) {
        if let Some(slot) = self.store.remove(id) {
            self.order.remove(&slot.seq);
        }
    }
}

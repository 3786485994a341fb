//! # Generic Messages
//!
//! Requests sent from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor), plus the value types that come back.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// An entity together with the store version it was read at.
///
/// Versions start at 1 on insertion and increase by one on every committed
/// update or action. Passing the version back to an update turns it into a
/// compare-and-set.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

/// One page of entities in insertion order.
///
/// `total` is counted in the same actor turn that produced `items`, so the two
/// always describe the same snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Internal message type sent to the actor to request operations.
///
/// The variants are the CRUD lifecycle of a resource plus paging and a
/// resource-specific `Action`. All payload types come from the
/// [`ActorEntity`] associated types.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<Versioned<T>>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        /// `Some(v)` rejects the update with `Conflict` unless the stored version is `v`.
        expected_version: Option<u64>,
        respond_to: Response<Versioned<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    List {
        offset: usize,
        limit: usize,
        respond_to: Response<Page<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

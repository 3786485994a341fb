//! # Generic Client
//!
//! The sending half of a [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Page, ResourceRequest, Response, Versioned};
use tokio::sync::{mpsc, oneshot};

/// A type-safe, cloneable handle to a `ResourceActor`.
///
/// Every method sends one request and waits on a oneshot reply. Cloning only
/// clones the channel sender; the actor stops once every clone is dropped.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Creates an entity and returns it as stored.
    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        Ok(self.fetch(id).await?.map(|found| found.value))
    }

    /// Like [`get`](Self::get) but also returns the store version.
    pub async fn fetch(&self, id: T::Id) -> Result<Option<Versioned<T>>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Unconditional update.
    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        let updated = self
            .request(|respond_to| ResourceRequest::Update {
                id,
                update,
                expected_version: None,
                respond_to,
            })
            .await?;
        Ok(updated.value)
    }

    /// Update that fails with [`FrameworkError::Conflict`] unless the stored
    /// version still equals `expected_version`.
    pub async fn update_if(
        &self,
        id: T::Id,
        expected_version: u64,
        update: T::Update,
    ) -> Result<Versioned<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            expected_version: Some(expected_version),
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    /// Returns up to `limit` entities starting at `offset`, in insertion order.
    pub async fn list(&self, offset: usize, limit: usize) -> Result<Page<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List {
            offset,
            limit,
            respond_to,
        })
        .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

//! # ActorClient Trait
//!
//! Domain wrappers around [`ResourceClient`] implement this trait to inherit
//! `get`, `delete` and `list` with their own error type.
use crate::{ActorEntity, FrameworkError, Page, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard CRUD operations.
///
/// Implementors provide the inner [`ResourceClient`] and a mapping from
/// [`FrameworkError`] into their own error enum; the read/delete/list plumbing
/// comes for free.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Room> for RoomRegistry {
///     type Error = RoomError;
///     fn inner(&self) -> &ResourceClient<Room> { &self.inner }
///     fn map_error(e: FrameworkError) -> RoomError { /* ... */ }
/// }
///
/// let room = registry.get(room_id).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// One page of entities in insertion order, with the total count.
    #[tracing::instrument(skip(self))]
    async fn list(&self, offset: usize, limit: usize) -> Result<Page<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .list(offset, limit)
            .await
            .map_err(Self::map_error)
    }
}

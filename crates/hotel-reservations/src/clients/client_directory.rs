//! # Client Directory
//!
//! High-level API over the `Client` actor.
use crate::client_actor::ClientError;
use crate::model::{Client, ClientCreate, ClientId, ClientUpdate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Client actor.
#[derive(Clone)]
pub struct ClientDirectory {
    inner: ResourceClient<Client>,
}

impl ClientDirectory {
    pub fn new(inner: ResourceClient<Client>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Client> for ClientDirectory {
    type Error = ClientError;

    fn inner(&self) -> &ResourceClient<Client> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<ClientError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ClientError::NotFound(id),
            Err(other) => ClientError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ClientDirectory {
    #[instrument(skip(self))]
    pub async fn create_client(&self, params: ClientCreate) -> Result<Client, ClientError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_client(
        &self,
        id: ClientId,
        update: ClientUpdate,
    ) -> Result<Client, ClientError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Like [`get`](ActorClient::get) but a missing client is an error.
    #[instrument(skip(self))]
    pub async fn require(&self, id: ClientId) -> Result<Client, ClientError> {
        self.get(id)
            .await?
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    #[tokio::test]
    async fn test_require_reports_missing_client() {
        let mut mock = MockClient::<Client>::new();
        mock.expect_get().return_ok(None);
        let directory = ClientDirectory::new(mock.client());

        let err = directory.require(ClientId(5)).await.unwrap_err();
        assert_eq!(err, ClientError::NotFound("client_5".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_surfaces_validation_error() {
        let mut mock = MockClient::<Client>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(
                ClientError::ValidationError("bad email".into()),
            )));
        let directory = ClientDirectory::new(mock.client());

        let err = directory
            .create_client(ClientCreate {
                name: "Ana".into(),
                email: "nope".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::ValidationError("bad email".into()));
        mock.verify();
    }
}

//! # Mock Clients
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of scripted expectations instead of a running actor.
//! It is the easy way to inject failures that a real actor will not produce on
//! demand: a store that refuses a write, an update that loses a version race,
//! a record that vanishes between two reads.
//!
//! ```rust,ignore
//! let mut store_mock = MockClient::<Reservation>::new();
//! store_mock.expect_create().return_err(FrameworkError::ActorClosed);
//!
//! let store = ReservationStore::new(store_mock.client());
//! let engine = ReservationEngine::new(rooms, clients, store, queue, mail);
//! assert!(engine.create(request).await.is_err());
//! store_mock.verify();
//! ```
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation panics the mock task, which surfaces in the test as
//! [`FrameworkError::ActorDropped`].
//!
//! For lower-level control, [`create_mock_client`] returns the raw receiver and
//! the `expect_*` helper functions pull individual requests off it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Page, ResourceRequest, Versioned};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A scripted reply for the next request.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<Versioned<T>>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        response: Result<Versioned<T>, FrameworkError>,
    },
    Delete {
        response: Result<(), FrameworkError>,
    },
    List {
        response: Result<Page<T>, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self) -> GetExpectation<T> {
        GetExpectation {
            queue: self.expectations.clone(),
        }
    }

    pub fn expect_create(&mut self) -> Reply<T, T> {
        Reply::new(self.expectations.clone(), |response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self) -> Reply<T, Versioned<T>> {
        Reply::new(self.expectations.clone(), |response| Expectation::Update { response })
    }

    pub fn expect_delete(&mut self) -> Reply<T, ()> {
        Reply::new(self.expectations.clone(), |response| Expectation::Delete { response })
    }

    pub fn expect_list(&mut self) -> Reply<T, Page<T>> {
        Reply::new(self.expectations.clone(), |response| Expectation::List { response })
    }

    pub fn expect_action(&mut self) -> Reply<T, T::ActionResult> {
        Reply::new(self.expectations.clone(), |response| Expectation::Action { response })
    }

    /// Panics unless every expectation has been consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder for a scripted reply of type `R`.
pub struct Reply<T: ActorEntity, R> {
    queue: Queue<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> Reply<T, R> {
    fn new(queue: Queue<T>, wrap: fn(Result<R, FrameworkError>) -> Expectation<T>) -> Self {
        Self { queue, wrap }
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        self.queue.lock().unwrap().push_back((self.wrap)(response));
    }
}

/// Builder for `get` expectations.
///
/// `return_ok` stores the entity at version 1; use `return_versioned` to
/// script a specific version.
pub struct GetExpectation<T: ActorEntity> {
    queue: Queue<T>,
}

impl<T: ActorEntity> GetExpectation<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.return_versioned(value.map(|value| Versioned { version: 1, value }));
    }

    pub fn return_versioned(self, value: Option<Versioned<T>>) {
        self.queue
            .lock()
            .unwrap()
            .push_back(Expectation::Get { response: Ok(value) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.queue
            .lock()
            .unwrap()
            .push_back(Expectation::Get { response: Err(error) });
    }
}

/// Creates a client wired to a receiver the test reads directly.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Pulls the next request and returns it if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, crate::message::Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Pulls the next request and returns it if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, crate::message::Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

//! Engine behavior against a scripted Reservation Store.
//!
//! Rooms and clients are real actors; the store is a [`MockClient`] so that
//! write failures and version races can be produced on demand.

use actor_framework::mock::{create_mock_client, expect_create, MockClient};
use actor_framework::tracing::setup_test_tracing;
use actor_framework::{ActorClient, FrameworkError, Versioned};
use chrono::NaiveDate;
use hotel_reservations::clients::{ReservationStore, RoomRegistry};
use hotel_reservations::engine::ReservationEngine;
use hotel_reservations::model::{
    ClientCreate, ClientId, Reservation, ReservationCreate, ReservationId, ReservationUpdate,
    RoomCreate, RoomId,
};
use hotel_reservations::notifier::{
    DispatchStats, MailConfig, NotificationDispatcher, RecordingNotifier,
};
use hotel_reservations::reservation_actor::ReservationError;
use hotel_reservations::{client_actor, room_actor};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Harness {
    engine: ReservationEngine,
    rooms: RoomRegistry,
    room_id: RoomId,
    client_id: ClientId,
    notifier: RecordingNotifier,
    dispatcher: JoinHandle<DispatchStats>,
}

async fn harness(store: &MockClient<Reservation>) -> Harness {
    harness_with(ReservationStore::new(store.client())).await
}

async fn harness_with(store: ReservationStore) -> Harness {
    setup_test_tracing();
    let (room_actor, rooms) = room_actor::new(8);
    let (client_actor, clients) = client_actor::new(8);
    tokio::spawn(room_actor.run(()));
    tokio::spawn(client_actor.run(()));

    let notifier = RecordingNotifier::new();
    let (dispatcher, queue) =
        NotificationDispatcher::new(8, Arc::new(notifier.clone()), Duration::from_secs(1));
    let dispatcher = tokio::spawn(dispatcher.run());

    let room = rooms
        .create_room(RoomCreate {
            room_type: "Double".into(),
            price_per_adult: 80.0,
            price_per_child: 40.0,
        })
        .await
        .unwrap();
    let client = clients
        .create_client(ClientCreate {
            name: "Ana".into(),
            email: "ana@example.com".into(),
        })
        .await
        .unwrap();

    let engine = ReservationEngine::new(
        rooms.clone(),
        clients,
        store,
        queue,
        MailConfig::default(),
    );
    Harness {
        engine,
        rooms,
        room_id: room.id,
        client_id: client.id,
        notifier,
        dispatcher,
    }
}

fn request(h: &Harness) -> ReservationCreate {
    ReservationCreate {
        user_id: "u1".into(),
        client_ids: vec![h.client_id],
        room_id: h.room_id,
        check_in: date(2024, 6, 1),
        check_out: date(2024, 6, 5),
        has_breakfast: true,
        is_all_inclusive: false,
        final_price: 400.0,
    }
}

fn stored(h: &Harness, version: u64) -> Versioned<Reservation> {
    Versioned {
        version,
        value: Reservation::new(ReservationId(1), request(h)).unwrap(),
    }
}

fn update() -> ReservationUpdate {
    ReservationUpdate {
        check_in: date(2024, 6, 2),
        check_out: date(2024, 6, 6),
        has_breakfast: false,
        is_all_inclusive: true,
    }
}

fn conflict(expected: u64, actual: u64) -> FrameworkError {
    FrameworkError::Conflict {
        id: "reservation_1".into(),
        expected,
        actual,
    }
}

#[tokio::test]
async fn test_persist_failure_releases_room() {
    let mut store = MockClient::<Reservation>::new();
    store.expect_create().return_err(FrameworkError::ActorClosed);
    let h = harness(&store).await;

    let err = h.engine.create(request(&h)).await.unwrap_err();
    assert!(matches!(err, ReservationError::ActorCommunicationError(_)));

    let room = h.rooms.get(h.room_id).await.unwrap().unwrap();
    assert!(room.is_free());
    store.verify();
}

#[tokio::test]
async fn test_room_can_be_booked_after_rolled_back_attempt() {
    let mut store = MockClient::<Reservation>::new();
    store.expect_create().return_err(FrameworkError::ActorClosed);
    let h = harness(&store).await;
    let persisted = stored(&h, 1).value;
    store.expect_create().return_ok(persisted.clone());

    assert!(h.engine.create(request(&h)).await.is_err());
    assert_eq!(h.engine.create(request(&h)).await.unwrap(), persisted);

    let room = h.rooms.get(h.room_id).await.unwrap().unwrap();
    assert!(!room.is_free());
    store.verify();
}

#[tokio::test]
async fn test_edit_retries_once_after_conflict() {
    let mut store = MockClient::<Reservation>::new();
    let h = harness(&store).await;

    let mut edited = stored(&h, 3);
    edited.value.check_in = date(2024, 6, 2);
    edited.value.check_out = date(2024, 6, 6);

    store.expect_get().return_versioned(Some(stored(&h, 1)));
    store.expect_update().return_err(conflict(1, 2));
    store.expect_get().return_versioned(Some(stored(&h, 2)));
    store.expect_update().return_ok(edited.clone());

    let result = h.engine.edit(ReservationId(1), update()).await.unwrap();
    assert_eq!(result, edited.value);
    store.verify();
}

#[tokio::test]
async fn test_edit_of_vanished_reservation_is_not_found() {
    let mut store = MockClient::<Reservation>::new();
    let h = harness(&store).await;

    store.expect_get().return_versioned(Some(stored(&h, 1)));
    store.expect_update().return_err(conflict(1, 2));
    store.expect_get().return_ok(None);

    let err = h.engine.edit(ReservationId(1), update()).await.unwrap_err();
    assert_eq!(err, ReservationError::NotFound("reservation_1".into()));
    store.verify();
}

#[tokio::test]
async fn test_second_conflict_is_reported() {
    let mut store = MockClient::<Reservation>::new();
    let h = harness(&store).await;

    store.expect_get().return_versioned(Some(stored(&h, 1)));
    store.expect_update().return_err(conflict(1, 2));
    store.expect_get().return_versioned(Some(stored(&h, 2)));
    store.expect_update().return_err(conflict(2, 3));

    let err = h.engine.edit(ReservationId(1), update()).await.unwrap_err();
    assert_eq!(err, ReservationError::ConcurrencyConflict("reservation_1".into()));
    store.verify();
}

#[tokio::test]
async fn test_invalid_edit_never_reaches_the_store() {
    let store = MockClient::<Reservation>::new();
    let h = harness(&store).await;

    let mut bad = update();
    bad.check_out = bad.check_in;
    let err = h.engine.edit(ReservationId(1), bad).await.unwrap_err();
    assert!(matches!(err, ReservationError::ValidationError(_)));
    store.verify();
}

#[tokio::test]
async fn test_confirmation_is_queued_when_caller_goes_away() {
    let (client, mut receiver) = create_mock_client::<Reservation>(4);
    let h = harness_with(ReservationStore::new(client)).await;

    let caller = {
        let engine = h.engine.clone();
        let request = request(&h);
        tokio::spawn(async move { engine.create(request).await })
    };

    let (params, responder) = expect_create(&mut receiver)
        .await
        .expect("Expected Create request");
    caller.abort();
    assert!(caller.await.unwrap_err().is_cancelled());

    responder
        .send(Ok(Reservation::new(ReservationId(1), params).unwrap()))
        .unwrap();

    let Harness {
        engine,
        rooms,
        room_id,
        notifier,
        dispatcher,
        ..
    } = h;
    drop(engine);
    let stats = dispatcher.await.unwrap();
    assert_eq!(stats, DispatchStats { delivered: 1, failed: 0 });
    assert_eq!(notifier.recipients(), vec!["ana@example.com"]);

    let room = rooms.get(room_id).await.unwrap().unwrap();
    assert!(!room.is_free());
}

//! # Hotel Reservations demo
//!
//! Starts a [`HotelSystem`], registers a few rooms and clients, then walks a
//! reservation through create, list, edit and delete before shutting down.
//!
//! ```bash
//! RUST_LOG=info cargo run -p hotel-reservations
//! ```

use actor_framework::tracing::setup_tracing;
use chrono::NaiveDate;
use hotel_reservations::lifecycle::{HotelConfig, HotelSystem};
use hotel_reservations::model::{ClientCreate, ReservationCreate, ReservationUpdate, RoomCreate};
use hotel_reservations::notifier::TracingNotifier;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate, String> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| format!("invalid date {y}-{m}-{d}"))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = HotelConfig::from_env().map_err(|e| e.to_string())?;
    let notifier = Arc::new(TracingNotifier::new(&config.mail));
    let system = HotelSystem::new(config, notifier);

    let mut room_ids = Vec::new();
    let seed_rooms = [
        ("Single", 60.0, 30.0),
        ("Double", 80.0, 40.0),
        ("Apartment", 140.0, 70.0),
    ];
    for (room_type, adult, child) in seed_rooms {
        let room = system
            .rooms
            .create_room(RoomCreate {
                room_type: room_type.to_string(),
                price_per_adult: adult,
                price_per_child: child,
            })
            .await
            .map_err(|e| e.to_string())?;
        room_ids.push(room.id);
    }

    let mut client_ids = Vec::new();
    for (name, email) in [("Ana Petrova", "ana@example.com"), ("Ivan Petrov", "ivan@example.com")] {
        let client = system
            .clients
            .create_client(ClientCreate {
                name: name.to_string(),
                email: email.to_string(),
            })
            .await
            .map_err(|e| e.to_string())?;
        client_ids.push(client.id);
    }
    info!(rooms = room_ids.len(), clients = client_ids.len(), "Hotel seeded");

    let request = ReservationCreate {
        user_id: "front-desk".into(),
        client_ids: client_ids.clone(),
        room_id: room_ids[1],
        check_in: date(2024, 6, 1)?,
        check_out: date(2024, 6, 5)?,
        has_breakfast: true,
        is_all_inclusive: false,
        final_price: 400.0,
    };

    let reservation = system
        .engine
        .create(request.clone())
        .instrument(tracing::info_span!("booking"))
        .await
        .map_err(|e| e.to_string())?;
    info!(reservation_id = %reservation.id, nights = reservation.nights(), "Booked");

    if let Err(e) = system.engine.create(request).await {
        warn!(error = %e, "Second booking of the same room refused");
    }

    let free = system.rooms.list_available().await.map_err(|e| e.to_string())?;
    info!(free = free.len(), "Rooms still free");

    let page = system.engine.list(1).await.map_err(|e| e.to_string())?;
    info!(
        shown = page.items.len(),
        total = page.total_count,
        pages = page.pages_count,
        "Listed reservations"
    );

    let edited = system
        .engine
        .edit(
            reservation.id,
            ReservationUpdate {
                check_in: date(2024, 6, 2)?,
                check_out: date(2024, 6, 6)?,
                has_breakfast: false,
                is_all_inclusive: true,
            },
        )
        .await
        .map_err(|e| e.to_string())?;
    info!(check_in = %edited.check_in, check_out = %edited.check_out, "Edited");

    system
        .engine
        .delete(reservation.id)
        .await
        .map_err(|e| e.to_string())?;
    let free = system.rooms.list_available().await.map_err(|e| e.to_string())?;
    info!(free = free.len(), "Reservation removed, room free again");

    let stats = system.shutdown().await?;
    info!(delivered = stats.delivered, "Done");
    Ok(())
}

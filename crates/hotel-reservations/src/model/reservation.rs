use crate::model::{ClientId, RoomId};
use crate::reservation_actor::ReservationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(pub u32);

impl From<u32> for ReservationId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "reservation_{}", self.0)
    }
}

/// Identity of the account that made the booking, issued by the caller's
/// authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Link between one reservation and one client. Owned by the reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientReservation {
    pub reservation_id: ReservationId,
    pub client_id: ClientId,
}

/// A booking of one room for one or more clients.
///
/// # Invariants
/// - `check_in < check_out`
/// - `final_price >= 0`
/// - at least one client link
///
/// All three are checked when the record is built from a
/// [`ReservationCreate`] and again whenever an update changes the dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub has_breakfast: bool,
    pub is_all_inclusive: bool,
    pub final_price: f64,
    pub clients: Vec<ClientReservation>,
}

impl Reservation {
    /// Builds a reservation after checking every invariant of `params`.
    ///
    /// Client links keep the order of `params.client_ids`; a client listed
    /// twice is linked once.
    pub fn new(id: ReservationId, params: ReservationCreate) -> Result<Self, ReservationError> {
        params.validate()?;
        let mut clients: Vec<ClientReservation> = Vec::with_capacity(params.client_ids.len());
        for client_id in params.client_ids {
            if !clients.iter().any(|link| link.client_id == client_id) {
                clients.push(ClientReservation {
                    reservation_id: id,
                    client_id,
                });
            }
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            room_id: params.room_id,
            check_in: params.check_in,
            check_out: params.check_out,
            has_breakfast: params.has_breakfast,
            is_all_inclusive: params.is_all_inclusive,
            final_price: params.final_price,
            clients,
        })
    }

    pub fn client_ids(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.clients.iter().map(|link| link.client_id)
    }

    /// Number of nights between check-in and check-out.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Payload for booking a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub user_id: UserId,
    pub client_ids: Vec<ClientId>,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub has_breakfast: bool,
    pub is_all_inclusive: bool,
    pub final_price: f64,
}

impl ReservationCreate {
    /// Domain validation only; client and room existence are checked by the engine.
    pub fn validate(&self) -> Result<(), ReservationError> {
        if self.client_ids.is_empty() {
            return Err(ReservationError::ValidationError(
                "a reservation needs at least one client".to_string(),
            ));
        }
        validate_stay(self.check_in, self.check_out)?;
        // Written so that NaN fails too.
        if !(self.final_price >= 0.0) {
            return Err(ReservationError::ValidationError(format!(
                "final price must not be negative, got {}",
                self.final_price
            )));
        }
        Ok(())
    }
}

/// Payload for editing the dates and amenities of a reservation.
///
/// The room and the linked clients cannot be changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub has_breakfast: bool,
    pub is_all_inclusive: bool,
}

impl ReservationUpdate {
    pub fn validate(&self) -> Result<(), ReservationError> {
        validate_stay(self.check_in, self.check_out)
    }
}

pub(crate) fn validate_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), ReservationError> {
    if check_in >= check_out {
        return Err(ReservationError::ValidationError(format!(
            "check-in {check_in} must be before check-out {check_out}"
        )));
    }
    Ok(())
}

/// Row shown in the reservation listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationSummary {
    pub id: ReservationId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub has_breakfast: bool,
    pub is_all_inclusive: bool,
    pub final_price: f64,
    pub client_ids: Vec<ClientId>,
}

impl From<&Reservation> for ReservationSummary {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id.clone(),
            room_id: r.room_id,
            check_in: r.check_in,
            check_out: r.check_out,
            has_breakfast: r.has_breakfast,
            is_all_inclusive: r.is_all_inclusive,
            final_price: r.final_price,
            client_ids: r.client_ids().collect(),
        }
    }
}

/// One page of the reservation listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationPage {
    pub items: Vec<ReservationSummary>,
    pub current_page: usize,
    pub pages_count: usize,
    pub total_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request() -> ReservationCreate {
        ReservationCreate {
            user_id: "u1".into(),
            client_ids: vec![ClientId(1), ClientId(2)],
            room_id: RoomId(1),
            check_in: date(2024, 6, 1),
            check_out: date(2024, 6, 5),
            has_breakfast: true,
            is_all_inclusive: false,
            final_price: 400.0,
        }
    }

    #[test]
    fn test_valid_request_builds_links() {
        let reservation = Reservation::new(ReservationId(7), request()).unwrap();
        assert_eq!(reservation.clients.len(), 2);
        assert!(reservation
            .clients
            .iter()
            .all(|link| link.reservation_id == ReservationId(7)));
        assert_eq!(reservation.nights(), 4);
    }

    #[test]
    fn test_duplicate_clients_are_linked_once() {
        let mut params = request();
        params.client_ids = vec![ClientId(2), ClientId(1), ClientId(2)];
        let reservation = Reservation::new(ReservationId(1), params).unwrap();
        let ids: Vec<ClientId> = reservation.client_ids().collect();
        assert_eq!(ids, vec![ClientId(2), ClientId(1)]);
    }

    #[test]
    fn test_rejects_empty_clients() {
        let mut params = request();
        params.client_ids.clear();
        assert!(matches!(
            params.validate(),
            Err(ReservationError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_and_empty_stays() {
        let mut params = request();
        params.check_out = params.check_in;
        assert!(params.validate().is_err());

        params.check_out = date(2024, 5, 30);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_and_nan_price() {
        let mut params = request();
        params.final_price = -0.01;
        assert!(params.validate().is_err());

        params.final_price = f64::NAN;
        assert!(params.validate().is_err());

        params.final_price = 0.0;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_summary_copies_links() {
        let reservation = Reservation::new(ReservationId(3), request()).unwrap();
        let summary = ReservationSummary::from(&reservation);
        assert_eq!(summary.client_ids, vec![ClientId(1), ClientId(2)]);
        assert_eq!(summary.final_price, 400.0);
    }
}

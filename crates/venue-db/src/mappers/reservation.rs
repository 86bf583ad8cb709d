//! Reservation entity <-> model mapper

use venue_core::entities::{NewReservation, Reservation};
use venue_core::error::DomainError;
use venue_core::value_objects::{
    ReservationId, ReservationStatus, ReservationTime, UserId, VenueId,
};

use crate::models::ReservationModel;

/// Convert ReservationModel to Reservation entity
///
/// Fails if the stored status token is not one the domain knows, which can
/// only happen if the table was written outside this crate.
impl TryFrom<ReservationModel> for Reservation {
    type Error = DomainError;

    fn try_from(model: ReservationModel) -> Result<Self, Self::Error> {
        let status = ReservationStatus::parse(&model.status).map_err(|e| {
            DomainError::DatabaseError(format!("reservation {}: {e}", model.id))
        })?;

        Ok(Reservation {
            id: ReservationId::new(model.id),
            venue_id: VenueId::new(model.venue_id),
            customer_id: UserId::new(model.customer_id),
            reservation_time: ReservationTime::from_datetime(model.reservation_time),
            party_size: model.party_size,
            status,
            notes: model.notes,
            created_at: model.created_at,
        })
    }
}

/// Convert a batch of rows, failing on the first bad row
pub fn reservations_from_models(
    models: Vec<ReservationModel>,
) -> Result<Vec<Reservation>, DomainError> {
    models.into_iter().map(Reservation::try_from).collect()
}

/// NewReservation values prepared for database insertion
pub struct ReservationInsert<'a> {
    pub customer_id: i64,
    pub venue_id: i64,
    pub reservation_time: chrono::DateTime<chrono::Utc>,
    pub party_size: i32,
    pub status: &'static str,
    pub notes: Option<&'a str>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> ReservationInsert<'a> {
    pub fn new(reservation: &'a NewReservation) -> Self {
        Self {
            customer_id: reservation.customer_id.into_inner(),
            venue_id: reservation.venue_id.into_inner(),
            reservation_time: reservation.reservation_time.as_datetime(),
            party_size: reservation.party_size,
            status: ReservationStatus::Pending.as_str(),
            notes: reservation.notes.as_deref(),
            created_at: reservation.created_at,
        }
    }
}

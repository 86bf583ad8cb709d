//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use venue_core::entities::Reservation;

use super::responses::ReservationResponse;

/// Reservation paired with the display name of its venue
#[derive(Debug, Clone)]
pub struct ReservationWithVenue {
    pub reservation: Reservation,
    pub venue_name: String,
}

impl From<ReservationWithVenue> for ReservationResponse {
    fn from(data: ReservationWithVenue) -> Self {
        let ReservationWithVenue {
            reservation,
            venue_name,
        } = data;

        Self {
            id: reservation.id,
            venue_id: reservation.venue_id,
            venue_name,
            customer_id: reservation.customer_id,
            reservation_time: reservation.reservation_time,
            party_size: reservation.party_size,
            status: reservation.status,
            notes: reservation.notes,
            created_at: reservation.created_at,
        }
    }
}

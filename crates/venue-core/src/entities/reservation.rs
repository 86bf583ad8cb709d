//! Reservation entity - one booked slot at a venue

use chrono::{DateTime, Utc};

use crate::value_objects::{ReservationId, ReservationStatus, ReservationTime, UserId, VenueId};

/// Reservation entity
///
/// `venue_id` and `customer_id` are fixed at creation; the only mutable
/// field after insert is `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub venue_id: VenueId,
    pub customer_id: UserId,
    pub reservation_time: ReservationTime,
    pub party_size: i32,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Check if a user is the customer who booked this reservation
    #[inline]
    pub fn is_customer(&self, user_id: UserId) -> bool {
        self.customer_id == user_id
    }

    /// The `(venue, time)` pair used for conflict detection
    #[inline]
    pub fn slot(&self) -> (VenueId, ReservationTime) {
        (self.venue_id, self.reservation_time)
    }
}

/// A reservation that has passed admission but has no id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub venue_id: VenueId,
    pub customer_id: UserId,
    pub reservation_time: ReservationTime,
    pub party_size: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewReservation {
    /// Create a pending reservation request stamped with `created_at`
    pub fn new(
        venue_id: VenueId,
        customer_id: UserId,
        reservation_time: ReservationTime,
        party_size: i32,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            venue_id,
            customer_id,
            reservation_time,
            party_size,
            notes,
            created_at,
        }
    }

    /// Attach a store-assigned id. New reservations always start `Pending`.
    pub fn into_reservation(self, id: ReservationId) -> Reservation {
        Reservation {
            id,
            venue_id: self.venue_id,
            customer_id: self.customer_id,
            reservation_time: self.reservation_time,
            party_size: self.party_size,
            status: ReservationStatus::Pending,
            notes: self.notes,
            created_at: self.created_at,
        }
    }

    #[inline]
    pub fn slot(&self) -> (VenueId, ReservationTime) {
        (self.venue_id, self.reservation_time)
    }
}

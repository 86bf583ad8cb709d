//! Response DTOs for reservation operations
//!
//! Times are serialized as `YYYY-MM-DD HH:MM` and statuses as lowercase tokens.

use chrono::{DateTime, Utc};
use serde::Serialize;
use venue_core::{ReservationId, ReservationStatus, ReservationTime, UserId, VenueId};

/// Canonical representation of a reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub venue_id: VenueId,
    pub venue_name: String,
    pub customer_id: UserId,
    pub reservation_time: ReservationTime,
    pub party_size: i32,
    pub status: ReservationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

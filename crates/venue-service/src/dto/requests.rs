//! Request DTOs for reservation operations
//!
//! Request DTOs implement `Deserialize`; the ones with field constraints also
//! implement `Validate`.

use serde::Deserialize;
use validator::Validate;
use venue_core::VenueId;

/// Create reservation request
///
/// `reservation_time` stays a raw string so the engine can report a
/// malformed value with its own error kind.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReservationRequest {
    pub venue_id: VenueId,

    /// `YYYY-MM-DD HH:MM`, UTC
    pub reservation_time: String,

    #[validate(range(min = 1, message = "Party size must be at least 1"))]
    pub party_size: i32,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Update reservation status request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    /// Lowercase status token
    pub status: String,
}

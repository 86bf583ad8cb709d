//! Test fixtures and data generators
//!
//! Provides a small venue world and request builders reused across tests.

use std::sync::atomic::{AtomicU64, Ordering};

use venue_core::{Identity, UserId, Venue, VenueId};
use venue_service::{CreateReservationRequest, UpdateStatusRequest};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Owner of [`HARBOR`] and [`ROOFTOP`]
pub const OWNER_ONE: UserId = UserId::new(100);
/// Owner of [`CELLAR`]
pub const OWNER_TWO: UserId = UserId::new(200);

pub const HARBOR: VenueId = VenueId::new(1);
pub const ROOFTOP: VenueId = VenueId::new(2);
pub const CELLAR: VenueId = VenueId::new(3);

/// The venues every in-memory test starts with
pub fn venues() -> Vec<Venue> {
    vec![
        Venue::new(HARBOR, OWNER_ONE, "Harbor Grill"),
        Venue::new(ROOFTOP, OWNER_ONE, "Rooftop Bar"),
        Venue::new(CELLAR, OWNER_TWO, "Wine Cellar"),
    ]
}

/// A fresh customer identity
pub fn new_customer() -> Identity {
    let id = 10_000 + i64::try_from(unique_suffix()).unwrap_or_default();
    Identity::customer(UserId::new(id))
}

/// Create reservation request for two people
pub fn reservation_request(venue_id: VenueId, time: &str) -> CreateReservationRequest {
    CreateReservationRequest {
        venue_id,
        reservation_time: time.to_string(),
        party_size: 2,
        notes: None,
    }
}

/// Update status request
pub fn status_request(status: &str) -> UpdateStatusRequest {
    UpdateStatusRequest {
        status: status.to_string(),
    }
}

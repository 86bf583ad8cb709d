//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what the reservation engine needs, and the
//! infrastructure layer provides the implementation.

use async_trait::async_trait;

use crate::entities::{NewReservation, Reservation, Venue};
use crate::error::DomainError;
use crate::value_objects::{
    Identity, ReservationId, ReservationStatus, ReservationTime, UserId, VenueId,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reservation Repository
// ============================================================================

/// Persistent collection of reservations
///
/// Every mutating method is atomic: it either applies completely or leaves
/// the stored data exactly as it was.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Find reservation by ID
    async fn find_by_id(&self, id: ReservationId) -> RepoResult<Option<Reservation>>;

    /// Find the reservation occupying a slot, if any
    async fn find_by_venue_and_time(
        &self,
        venue_id: VenueId,
        reservation_time: ReservationTime,
    ) -> RepoResult<Option<Reservation>>;

    /// List all reservations booked by a customer
    async fn find_by_customer(&self, customer_id: UserId) -> RepoResult<Vec<Reservation>>;

    /// List all reservations for a venue
    async fn find_by_venue(&self, venue_id: VenueId) -> RepoResult<Vec<Reservation>>;

    /// List all reservations for any of the given venues
    async fn find_by_venues(&self, venue_ids: &[VenueId]) -> RepoResult<Vec<Reservation>>;

    /// Insert a new pending reservation and return it with its assigned id
    ///
    /// The slot check and the insert happen as one unit. If the slot is
    /// already occupied this returns `DomainError::SlotConflict` and writes
    /// nothing.
    async fn insert(&self, reservation: &NewReservation) -> RepoResult<Reservation>;

    /// Move a reservation from status `from` to status `to` and return the
    /// updated record
    ///
    /// The status comparison and the write happen as one unit. If the stored
    /// status is no longer `from` this returns
    /// `DomainError::InvalidTransition` carrying the stored status and writes
    /// nothing.
    async fn update_status(
        &self,
        id: ReservationId,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> RepoResult<Reservation>;

    /// Permanently remove a reservation
    async fn delete(&self, id: ReservationId) -> RepoResult<()>;
}

// ============================================================================
// Venue Directory
// ============================================================================

/// Read-only lookup of venue existence and ownership
#[async_trait]
pub trait VenueDirectory: Send + Sync {
    /// Find venue by ID
    async fn get_venue(&self, id: VenueId) -> RepoResult<Option<Venue>>;

    /// List the ids of all venues owned by a user
    async fn list_venues_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<VenueId>>;
}

// ============================================================================
// Identity Resolution
// ============================================================================

/// Turns a caller credential into an identity and role
pub trait IdentityResolver: Send + Sync {
    /// Resolve a bearer token, failing with `DomainError::Unauthenticated`
    fn resolve(&self, token: &str) -> RepoResult<Identity>;
}

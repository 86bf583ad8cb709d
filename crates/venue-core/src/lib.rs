//! # venue-core
//!
//! Domain layer containing the reservation and venue entities, value objects,
//! the status transition table, and the repository traits (ports) consumed by
//! the reservation engine.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{NewReservation, Reservation, Venue};
pub use error::DomainError;
pub use traits::{
    Clock, FixedClock, IdentityResolver, RepoResult, ReservationRepository, SystemClock,
    VenueDirectory,
};
pub use value_objects::{
    Identity, IdParseError, ReservationId, ReservationStatus, ReservationTime,
    ReservationTimeParseError, StatusParseError, UserId, UserRole, VenueId, STATUS_TRANSITIONS,
};

//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in venue-core.

mod error;
mod reservation;
mod venue;

pub use reservation::PgReservationRepository;
pub use venue::PgVenueDirectory;

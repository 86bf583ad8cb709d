//! Database models - SQLx-compatible structs for PostgreSQL tables

mod reservation;
mod venue;

pub use reservation::ReservationModel;
pub use venue::VenueModel;

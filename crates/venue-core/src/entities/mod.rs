//! Domain entities - core business objects

mod reservation;
mod venue;

pub use reservation::{NewReservation, Reservation};
pub use venue::Venue;

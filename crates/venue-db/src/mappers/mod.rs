//! Entity to model mappers
//!
//! This module provides conversions between domain entities (venue-core) and database models.
//! - `TryFrom<Model>`/`From<Model>` for entities: convert database rows to domain objects
//! - `*Insert` structs: prepare entity data for database operations

mod reservation;
mod venue;

pub use reservation::{reservations_from_models, ReservationInsert};

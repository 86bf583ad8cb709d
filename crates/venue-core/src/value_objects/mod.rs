//! Value objects - immutable types that represent domain concepts

mod identity;
mod ids;
mod reservation_time;
mod status;

pub use identity::{Identity, UserRole};
pub use ids::{IdParseError, ReservationId, UserId, VenueId};
pub use reservation_time::{ReservationTime, ReservationTimeParseError};
pub use status::{ReservationStatus, StatusParseError, STATUS_TRANSITIONS};

//! Traits (ports) implemented by the infrastructure layer

mod clock;
mod repositories;

pub use clock::{Clock, FixedClock, SystemClock};
pub use repositories::{IdentityResolver, RepoResult, ReservationRepository, VenueDirectory};

//! Business logic services
//!
//! The reservation engine and the authorization helpers it consumes, plus
//! the dependency container they share.

pub mod authorization;
pub mod context;
pub mod error;
pub mod reservation;

// Re-export all services for convenience
pub use authorization::AuthorizationService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use reservation::ReservationService;

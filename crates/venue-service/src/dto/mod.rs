//! Data transfer objects for reservation requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for engine inputs
//! - Response DTOs for serializing engine outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use mappers::ReservationWithVenue;
pub use requests::{CreateReservationRequest, UpdateStatusRequest};
pub use responses::ReservationResponse;

//! # venue-service
//!
//! Application layer containing the reservation engine, authorization rules,
//! and DTOs.

pub mod dto;
pub mod services;

pub use dto::{CreateReservationRequest, ReservationResponse, UpdateStatusRequest};
pub use services::{
    AuthorizationService, ErrorKind, ReservationService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};

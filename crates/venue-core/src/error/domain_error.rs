//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ReservationId, ReservationStatus, ReservationTime, VenueId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Reservation not found: {0}")]
    ReservationNotFound(ReservationId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Cannot change reservation status from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Slot already reserved: venue {venue_id} at {reservation_time}")]
    SlotConflict {
        venue_id: VenueId,
        reservation_time: ReservationTime,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReservationNotFound(_) => "UNKNOWN_RESERVATION",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::SlotConflict { .. } => "SLOT_CONFLICT",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ReservationNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidStatus(_) | Self::InvalidTransition { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SlotConflict { .. })
    }

    /// Check if this is a persistence or other infrastructure fault
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::InternalError(_))
    }
}

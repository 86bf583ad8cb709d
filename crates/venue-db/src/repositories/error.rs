//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use venue_core::error::DomainError;
use venue_core::value_objects::ReservationId;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "reservation not found" error
pub fn reservation_not_found(id: ReservationId) -> DomainError {
    DomainError::ReservationNotFound(id)
}

//! Service layer error types
//!
//! Every engine failure carries one [`ErrorKind`] from a closed set plus a
//! human readable message.

use std::fmt;

use venue_common::ErrorResponse;
use venue_core::DomainError;

/// Closed set of failure kinds reported by the reservation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthenticated,
    /// Role or ownership mismatch
    Forbidden,
    NotFound,
    /// Malformed reservation time
    InvalidFormat,
    /// Unknown status token
    InvalidStatus,
    /// Status change not allowed from the current state
    InvalidTransition,
    PastDate,
    SlotTaken,
    /// Store-level uniqueness conflict
    Conflict,
    /// Request field constraints (party size, notes length)
    Validation,
    /// Persistence fault; the in-flight mutation was rolled back
    StoreFailure,
}

impl ErrorKind {
    /// Stable code string for this kind
    pub fn code(self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::PastDate => "PAST_DATE",
            Self::SlotTaken => "SLOT_TAKEN",
            Self::Conflict => "CONFLICT",
            Self::Validation => "VALIDATION_ERROR",
            Self::StoreFailure => "STORE_FAILURE",
        }
    }

    /// HTTP status code a routing layer would use for this kind
    pub fn status_code(self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::InvalidFormat
            | Self::InvalidStatus
            | Self::InvalidTransition
            | Self::PastDate
            | Self::Validation => 400,
            Self::SlotTaken | Self::Conflict => 409,
            Self::StoreFailure => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation or store fault
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Resource not found
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Caller lacks the role or ownership required
    #[error("{0}")]
    Forbidden(String),

    /// Reservation time did not parse
    #[error("{0}")]
    InvalidFormat(String),

    #[error("Reservation time must be in the future")]
    PastDate,

    #[error("This time slot is already taken")]
    SlotTaken,

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => match e {
                DomainError::ReservationNotFound(_) => ErrorKind::NotFound,
                DomainError::InvalidStatus(_) => ErrorKind::InvalidStatus,
                DomainError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
                DomainError::Unauthenticated(_) => ErrorKind::Unauthenticated,
                DomainError::SlotConflict { .. } => ErrorKind::Conflict,
                DomainError::DatabaseError(_) | DomainError::InternalError(_) => {
                    ErrorKind::StoreFailure
                }
            },
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Self::PastDate => ErrorKind::PastDate,
            Self::SlotTaken => ErrorKind::SlotTaken,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Human readable description
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            other => other.kind().code(),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        ErrorResponse::new(err.error_code(), err.message())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

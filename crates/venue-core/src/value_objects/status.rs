//! Reservation status and the owner-driven transition table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a reservation
///
/// Wire tokens are the lowercase names (`pending`, `confirmed`, `rejected`,
/// `cancelled`) and parsing is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

/// Every status change an owner may apply, as `(from, to)` pairs.
///
/// Only `Pending` can move. `Confirmed`, `Rejected` and `Cancelled` are
/// terminal, so re-entry to `Pending` is rejected. Writing the current status
/// again is not listed here; it is accepted as a no-op by
/// [`ReservationStatus::can_transition_to`].
pub const STATUS_TRANSITIONS: &[(ReservationStatus, ReservationStatus)] = &[
    (ReservationStatus::Pending, ReservationStatus::Confirmed),
    (ReservationStatus::Pending, ReservationStatus::Rejected),
    (ReservationStatus::Pending, ReservationStatus::Cancelled),
];

impl ReservationStatus {
    /// All statuses in declaration order
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Rejected,
        Self::Cancelled,
    ];

    /// Get the wire token for this status
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a wire token (case-sensitive)
    pub fn parse(token: &str) -> Result<Self, StatusParseError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == token)
            .ok_or_else(|| StatusParseError::Unknown(token.to_string()))
    }

    /// Check if no further transition is possible from this status
    pub fn is_terminal(self) -> bool {
        !STATUS_TRANSITIONS.iter().any(|(from, _)| *from == self)
    }

    /// Check if the transition table permits moving to `next`
    pub fn can_transition_to(self, next: Self) -> bool {
        self == next
            || STATUS_TRANSITIONS
                .iter()
                .any(|&(from, to)| from == self && to == next)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error when parsing a status token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusParseError {
    #[error("invalid status: {0}")]
    Unknown(String),
}

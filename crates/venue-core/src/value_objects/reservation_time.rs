//! Reservation time - the start of a booked slot
//!
//! Clients send `YYYY-MM-DD HH:MM`; the value is interpreted as UTC and kept
//! at minute precision. Two reservations conflict only when their times are
//! identical for the same venue.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Start timestamp of a reservation slot (UTC, minute precision)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReservationTime(DateTime<Utc>);

impl ReservationTime {
    /// Accepted input and display format
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M";

    /// Parse the fixed `YYYY-MM-DD HH:MM` format
    pub fn parse(s: &str) -> Result<Self, ReservationTimeParseError> {
        NaiveDateTime::parse_from_str(s, Self::FORMAT)
            .map(|naive| Self(naive.and_utc()))
            .map_err(|_| ReservationTimeParseError::InvalidFormat(s.to_string()))
    }

    /// Wrap a stored timestamp, dropping seconds and sub-seconds
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let truncated = dt
            .with_second(0)
            .and_then(|d| d.with_nanosecond(0))
            .unwrap_or(dt);
        Self(truncated)
    }

    /// Get the underlying UTC timestamp
    #[inline]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Check if this time lies strictly after `now`
    #[inline]
    pub fn is_after(&self, now: DateTime<Utc>) -> bool {
        self.0 > now
    }
}

impl fmt::Display for ReservationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl From<ReservationTime> for DateTime<Utc> {
    fn from(time: ReservationTime) -> Self {
        time.0
    }
}

impl std::str::FromStr for ReservationTime {
    type Err = ReservationTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ReservationTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReservationTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Error when parsing a reservation time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationTimeParseError {
    #[error("invalid reservation time '{0}', expected YYYY-MM-DD HH:MM")]
    InvalidFormat(String),
}

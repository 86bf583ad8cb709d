//! Reservation database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reservations table
#[derive(Debug, Clone, FromRow)]
pub struct ReservationModel {
    pub id: i64,
    pub customer_id: i64,
    pub venue_id: i64,
    pub reservation_time: DateTime<Utc>,
    pub party_size: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

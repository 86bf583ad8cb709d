//! Venue database model

use sqlx::FromRow;

/// Database model for the columns of the venues table the engine reads
#[derive(Debug, Clone, FromRow)]
pub struct VenueModel {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
}

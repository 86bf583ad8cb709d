//! Venue entity - read-only view of a bookable establishment

use crate::value_objects::{UserId, VenueId};

/// Venue as seen by the reservation engine: existence, owner and display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    pub id: VenueId,
    pub owner_id: UserId,
    pub name: String,
}

impl Venue {
    pub fn new(id: VenueId, owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
        }
    }

    /// Check if a user owns this venue
    #[inline]
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

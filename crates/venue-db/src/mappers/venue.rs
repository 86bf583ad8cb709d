//! Venue entity <-> model mapper

use venue_core::entities::Venue;
use venue_core::value_objects::{UserId, VenueId};

use crate::models::VenueModel;

/// Convert VenueModel to Venue entity
impl From<VenueModel> for Venue {
    fn from(model: VenueModel) -> Self {
        Venue {
            id: VenueId::new(model.id),
            owner_id: UserId::new(model.owner_id),
            name: model.name,
        }
    }
}

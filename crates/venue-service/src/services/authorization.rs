//! Authorization service
//!
//! Resolves caller identities and answers venue ownership questions for
//! every operation that needs them.

use tracing::{debug, instrument};
use venue_core::{DomainError, Identity, UserId, VenueId};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authorization service for identity and ownership checks
pub struct AuthorizationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthorizationService<'a> {
    /// Create a new AuthorizationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve a bearer token into the caller identity
    ///
    /// # Errors
    /// Fails with `Unauthenticated` if no resolver is configured or the token
    /// is rejected
    #[instrument(skip(self, token))]
    pub fn authenticate(&self, token: &str) -> ServiceResult<Identity> {
        let resolver = self.ctx.identity_resolver().ok_or_else(|| {
            DomainError::Unauthenticated("No identity resolver configured".to_string())
        })?;

        let identity = resolver.resolve(token)?;
        debug!(user_id = %identity.user_id, role = identity.role.as_str(), "Caller authenticated");
        Ok(identity)
    }

    /// Check if a user owns a venue. A missing venue is owned by nobody.
    #[instrument(skip(self))]
    pub async fn is_venue_owner(&self, user_id: UserId, venue_id: VenueId) -> ServiceResult<bool> {
        let venue = self.ctx.venue_directory().get_venue(venue_id).await?;
        Ok(venue.is_some_and(|v| v.is_owner(user_id)))
    }

    /// Check venue ownership and return a forbidden error if denied
    #[instrument(skip(self, message))]
    pub async fn require_venue_owner(
        &self,
        user_id: UserId,
        venue_id: VenueId,
        message: &str,
    ) -> ServiceResult<()> {
        if !self.is_venue_owner(user_id, venue_id).await? {
            debug!(user_id = %user_id, venue_id = %venue_id, "Venue ownership check failed");
            return Err(ServiceError::forbidden(message));
        }
        Ok(())
    }
}

//! Reservation service
//!
//! The reservation engine: admission of new bookings, slot conflict
//! resolution, owner status transitions, cancellation and listings. Every
//! operation takes the already-resolved caller [`Identity`].

use std::collections::BTreeMap;

use tracing::{info, instrument, warn};
use validator::Validate;
use venue_core::entities::{NewReservation, Reservation};
use venue_core::{
    DomainError, Identity, ReservationId, ReservationStatus, ReservationTime, UserRole, VenueId,
};

use crate::dto::{
    CreateReservationRequest, ReservationResponse, ReservationWithVenue, UpdateStatusRequest,
};

use super::authorization::AuthorizationService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reservation service
pub struct ReservationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReservationService<'a> {
    /// Create a new ReservationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn auth(&self) -> AuthorizationService<'a> {
        AuthorizationService::new(self.ctx)
    }

    /// Book a slot at a venue
    ///
    /// Checks run in a fixed order and the first failure wins: caller role,
    /// time format, time in the future, venue exists, slot free. Field
    /// constraints on the request are checked last.
    #[instrument(skip(self, request), fields(user_id = %identity.user_id, venue_id = %request.venue_id))]
    pub async fn create_reservation(
        &self,
        identity: &Identity,
        request: CreateReservationRequest,
    ) -> ServiceResult<ReservationResponse> {
        if !identity.is_customer() {
            return Err(ServiceError::forbidden("Only customers can make reservations"));
        }

        let reservation_time = ReservationTime::parse(&request.reservation_time).map_err(|_| {
            ServiceError::InvalidFormat(format!(
                "Invalid datetime format, expected YYYY-MM-DD HH:MM: {}",
                request.reservation_time
            ))
        })?;

        let now = self.ctx.clock().now();
        if !reservation_time.is_after(now) {
            return Err(ServiceError::PastDate);
        }

        let venue = self
            .ctx
            .venue_directory()
            .get_venue(request.venue_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue", request.venue_id))?;

        if self
            .ctx
            .reservation_repo()
            .find_by_venue_and_time(venue.id, reservation_time)
            .await?
            .is_some()
        {
            return Err(ServiceError::SlotTaken);
        }

        request.validate()?;

        let new_reservation = NewReservation::new(
            venue.id,
            identity.user_id,
            reservation_time,
            request.party_size,
            request.notes,
            now,
        );

        // The store re-checks the slot atomically; a concurrent winner shows
        // up here as a conflict.
        let reservation = match self.ctx.reservation_repo().insert(&new_reservation).await {
            Ok(reservation) => reservation,
            Err(DomainError::SlotConflict { .. }) => {
                warn!(slot = %reservation_time, "Lost slot race on insert");
                return Err(ServiceError::SlotTaken);
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            reservation_id = %reservation.id,
            slot = %reservation.reservation_time,
            "Reservation created"
        );

        Ok(ReservationResponse::from(ReservationWithVenue {
            reservation,
            venue_name: venue.name,
        }))
    }

    /// List the reservations visible to the caller
    ///
    /// Customers see their own bookings, owners see every booking at any of
    /// their venues, anyone else sees nothing. Results are in id order.
    #[instrument(skip(self), fields(user_id = %identity.user_id))]
    pub async fn list_reservations(
        &self,
        identity: &Identity,
    ) -> ServiceResult<Vec<ReservationResponse>> {
        let reservations = match identity.role {
            UserRole::Customer => {
                self.ctx
                    .reservation_repo()
                    .find_by_customer(identity.user_id)
                    .await?
            }
            UserRole::Owner => {
                let venue_ids = self
                    .ctx
                    .venue_directory()
                    .list_venues_by_owner(identity.user_id)
                    .await?;
                self.ctx.reservation_repo().find_by_venues(&venue_ids).await?
            }
            UserRole::Unknown => Vec::new(),
        };

        self.with_venue_names(reservations).await
    }

    /// Change the status of a reservation at one of the caller's venues
    #[instrument(skip(self, request), fields(user_id = %identity.user_id, status = %request.status))]
    pub async fn update_status(
        &self,
        identity: &Identity,
        reservation_id: ReservationId,
        request: UpdateStatusRequest,
    ) -> ServiceResult<ReservationResponse> {
        let reservation = self.find_reservation(reservation_id).await?;

        self.auth()
            .require_venue_owner(
                identity.user_id,
                reservation.venue_id,
                "No permission to update this reservation",
            )
            .await?;

        let next = ReservationStatus::parse(&request.status)
            .map_err(|_| DomainError::InvalidStatus(request.status.clone()))?;

        if !reservation.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: reservation.status,
                to: next,
            }
            .into());
        }

        let reservation = if reservation.status == next {
            reservation
        } else {
            // The store rejects the write if another caller moved the
            // reservation since it was read above.
            let updated = self
                .ctx
                .reservation_repo()
                .update_status(reservation_id, reservation.status, next)
                .await?;
            info!(reservation_id = %reservation_id, status = %next, "Reservation status updated");
            updated
        };

        self.respond(reservation).await
    }

    /// Permanently remove one of the caller's own reservations
    #[instrument(skip(self), fields(user_id = %identity.user_id))]
    pub async fn delete_reservation(
        &self,
        identity: &Identity,
        reservation_id: ReservationId,
    ) -> ServiceResult<()> {
        let reservation = self.find_reservation(reservation_id).await?;

        if !reservation.is_customer(identity.user_id) {
            return Err(ServiceError::forbidden(
                "No permission to delete this reservation",
            ));
        }

        self.ctx.reservation_repo().delete(reservation_id).await?;

        info!(reservation_id = %reservation_id, "Reservation deleted");
        Ok(())
    }

    /// List every reservation at a venue the caller owns
    #[instrument(skip(self), fields(user_id = %identity.user_id))]
    pub async fn list_venue_reservations(
        &self,
        identity: &Identity,
        venue_id: VenueId,
    ) -> ServiceResult<Vec<ReservationResponse>> {
        let venue = self
            .ctx
            .venue_directory()
            .get_venue(venue_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue", venue_id))?;

        self.auth()
            .require_venue_owner(
                identity.user_id,
                venue.id,
                "No permission to view reservations for this venue",
            )
            .await?;

        let reservations = self.ctx.reservation_repo().find_by_venue(venue.id).await?;

        Ok(reservations
            .into_iter()
            .map(|reservation| {
                ReservationResponse::from(ReservationWithVenue {
                    reservation,
                    venue_name: venue.name.clone(),
                })
            })
            .collect())
    }

    /// Get one reservation, visible to its customer and the venue owner
    #[instrument(skip(self), fields(user_id = %identity.user_id))]
    pub async fn get_reservation(
        &self,
        identity: &Identity,
        reservation_id: ReservationId,
    ) -> ServiceResult<ReservationResponse> {
        let reservation = self.find_reservation(reservation_id).await?;

        let visible = reservation.is_customer(identity.user_id)
            || self
                .auth()
                .is_venue_owner(identity.user_id, reservation.venue_id)
                .await?;
        if !visible {
            return Err(ServiceError::forbidden("No permission to view this reservation"));
        }

        self.respond(reservation).await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn find_reservation(&self, id: ReservationId) -> ServiceResult<Reservation> {
        self.ctx
            .reservation_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Reservation", id))
    }

    async fn respond(&self, reservation: Reservation) -> ServiceResult<ReservationResponse> {
        let mut responses = self.with_venue_names(vec![reservation]).await?;
        responses
            .pop()
            .ok_or_else(|| DomainError::InternalError("empty response batch".to_string()).into())
    }

    /// Attach venue names, looking each venue up once
    async fn with_venue_names(
        &self,
        reservations: Vec<Reservation>,
    ) -> ServiceResult<Vec<ReservationResponse>> {
        let mut names: BTreeMap<VenueId, String> = BTreeMap::new();
        for reservation in &reservations {
            if names.contains_key(&reservation.venue_id) {
                continue;
            }
            let name = match self
                .ctx
                .venue_directory()
                .get_venue(reservation.venue_id)
                .await?
            {
                Some(venue) => venue.name,
                None => {
                    warn!(venue_id = %reservation.venue_id, "Reservation references unknown venue");
                    String::new()
                }
            };
            names.insert(reservation.venue_id, name);
        }

        Ok(reservations
            .into_iter()
            .map(|reservation| {
                let venue_name = names.get(&reservation.venue_id).cloned().unwrap_or_default();
                ReservationResponse::from(ReservationWithVenue {
                    reservation,
                    venue_name,
                })
            })
            .collect())
    }
}

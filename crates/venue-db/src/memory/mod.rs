//! In-memory reservation store
//!
//! A process-local implementation of both [`ReservationRepository`] and
//! [`VenueDirectory`] for tests and embedded use. All state sits behind one
//! mutex, so a slot check and its insert can never interleave with another
//! writer. Each write runs against a working copy that replaces the live
//! state only when the whole write succeeds.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, instrument};

use venue_core::entities::{NewReservation, Reservation, Venue};
use venue_core::error::DomainError;
use venue_core::traits::{RepoResult, ReservationRepository, VenueDirectory};
use venue_core::value_objects::{
    ReservationId, ReservationStatus, ReservationTime, UserId, VenueId,
};

#[derive(Debug, Clone)]
struct StoreState {
    reservations: BTreeMap<ReservationId, Reservation>,
    venues: BTreeMap<VenueId, Venue>,
    next_id: i64,
    fail_next_write: bool,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            reservations: BTreeMap::new(),
            venues: BTreeMap::new(),
            next_id: 1,
            fail_next_write: false,
        }
    }
}

impl StoreState {
    fn slot_taken(&self, venue_id: VenueId, reservation_time: ReservationTime) -> bool {
        self.reservations
            .values()
            .any(|r| r.slot() == (venue_id, reservation_time))
    }

    fn matching<F>(&self, predicate: F) -> Vec<Reservation>
    where
        F: Fn(&Reservation) -> bool,
    {
        // BTreeMap iteration yields ascending ids
        self.reservations
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }
}

/// Shared in-memory store; clones share the same state
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a venue so it can be looked up and booked
    pub fn add_venue(&self, venue: Venue) {
        self.state.lock().venues.insert(venue.id, venue);
    }

    /// Make the next mutating call fail with a database error after it has
    /// modified its working copy. The live state must come out unchanged.
    pub fn fail_next_write(&self) {
        self.state.lock().fail_next_write = true;
    }

    /// Number of stored reservations
    pub fn reservation_count(&self) -> usize {
        self.state.lock().reservations.len()
    }

    /// Run a write against a copy of the state and publish it on success
    fn transact<T, F>(&self, write: F) -> RepoResult<T>
    where
        F: FnOnce(&mut StoreState) -> RepoResult<T>,
    {
        let mut live = self.state.lock();
        let mut working = live.clone();

        let value = write(&mut working)?;

        if live.fail_next_write {
            live.fail_next_write = false;
            debug!("Injected write failure, discarding working copy");
            return Err(DomainError::DatabaseError(
                "injected write failure".to_string(),
            ));
        }

        *live = working;
        Ok(value)
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn find_by_id(&self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        Ok(self.state.lock().reservations.get(&id).cloned())
    }

    async fn find_by_venue_and_time(
        &self,
        venue_id: VenueId,
        reservation_time: ReservationTime,
    ) -> RepoResult<Option<Reservation>> {
        let state = self.state.lock();
        Ok(state
            .reservations
            .values()
            .find(|r| r.slot() == (venue_id, reservation_time))
            .cloned())
    }

    async fn find_by_customer(&self, customer_id: UserId) -> RepoResult<Vec<Reservation>> {
        Ok(self.state.lock().matching(|r| r.customer_id == customer_id))
    }

    async fn find_by_venue(&self, venue_id: VenueId) -> RepoResult<Vec<Reservation>> {
        Ok(self.state.lock().matching(|r| r.venue_id == venue_id))
    }

    async fn find_by_venues(&self, venue_ids: &[VenueId]) -> RepoResult<Vec<Reservation>> {
        Ok(self
            .state
            .lock()
            .matching(|r| venue_ids.contains(&r.venue_id)))
    }

    #[instrument(skip(self, reservation), fields(venue_id = %reservation.venue_id))]
    async fn insert(&self, reservation: &NewReservation) -> RepoResult<Reservation> {
        self.transact(|state| {
            let (venue_id, reservation_time) = reservation.slot();
            if state.slot_taken(venue_id, reservation_time) {
                return Err(DomainError::SlotConflict {
                    venue_id,
                    reservation_time,
                });
            }

            let id = ReservationId::new(state.next_id);
            state.next_id += 1;

            let stored = reservation.clone().into_reservation(id);
            state.reservations.insert(id, stored.clone());
            Ok(stored)
        })
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: ReservationId,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> RepoResult<Reservation> {
        self.transact(|state| {
            let reservation = state
                .reservations
                .get_mut(&id)
                .ok_or(DomainError::ReservationNotFound(id))?;
            if reservation.status != from {
                return Err(DomainError::InvalidTransition {
                    from: reservation.status,
                    to,
                });
            }
            reservation.status = to;
            Ok(reservation.clone())
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ReservationId) -> RepoResult<()> {
        self.transact(|state| {
            state
                .reservations
                .remove(&id)
                .map(|_| ())
                .ok_or(DomainError::ReservationNotFound(id))
        })
    }
}

#[async_trait]
impl VenueDirectory for InMemoryStore {
    async fn get_venue(&self, id: VenueId) -> RepoResult<Option<Venue>> {
        Ok(self.state.lock().venues.get(&id).cloned())
    }

    async fn list_venues_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<VenueId>> {
        Ok(self
            .state
            .lock()
            .venues
            .values()
            .filter(|v| v.is_owner(owner_id))
            .map(|v| v.id)
            .collect())
    }
}

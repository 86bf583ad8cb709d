//! PostgreSQL implementation of ReservationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use venue_core::entities::{NewReservation, Reservation};
use venue_core::error::DomainError;
use venue_core::traits::{RepoResult, ReservationRepository};
use venue_core::value_objects::{
    ReservationId, ReservationStatus, ReservationTime, UserId, VenueId,
};

use crate::mappers::{reservations_from_models, ReservationInsert};
use crate::models::ReservationModel;

use super::error::{map_db_error, map_unique_violation, reservation_not_found};

/// PostgreSQL implementation of ReservationRepository
///
/// The `uq_reservations_slot` constraint backs the slot check, so two
/// concurrent inserts for the same slot cannot both commit.
#[derive(Clone)]
pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    /// Create a new PgReservationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        let result = sqlx::query_as::<_, ReservationModel>(
            r#"
            SELECT id, customer_id, venue_id, reservation_time, party_size, status, notes, created_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reservation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_venue_and_time(
        &self,
        venue_id: VenueId,
        reservation_time: ReservationTime,
    ) -> RepoResult<Option<Reservation>> {
        let result = sqlx::query_as::<_, ReservationModel>(
            r#"
            SELECT id, customer_id, venue_id, reservation_time, party_size, status, notes, created_at
            FROM reservations
            WHERE venue_id = $1 AND reservation_time = $2
            "#,
        )
        .bind(venue_id.into_inner())
        .bind(reservation_time.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reservation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_customer(&self, customer_id: UserId) -> RepoResult<Vec<Reservation>> {
        let results = sqlx::query_as::<_, ReservationModel>(
            r#"
            SELECT id, customer_id, venue_id, reservation_time, party_size, status, notes, created_at
            FROM reservations
            WHERE customer_id = $1
            ORDER BY id
            "#,
        )
        .bind(customer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        reservations_from_models(results)
    }

    #[instrument(skip(self))]
    async fn find_by_venue(&self, venue_id: VenueId) -> RepoResult<Vec<Reservation>> {
        let results = sqlx::query_as::<_, ReservationModel>(
            r#"
            SELECT id, customer_id, venue_id, reservation_time, party_size, status, notes, created_at
            FROM reservations
            WHERE venue_id = $1
            ORDER BY id
            "#,
        )
        .bind(venue_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        reservations_from_models(results)
    }

    #[instrument(skip(self))]
    async fn find_by_venues(&self, venue_ids: &[VenueId]) -> RepoResult<Vec<Reservation>> {
        if venue_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = venue_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, ReservationModel>(
            r#"
            SELECT id, customer_id, venue_id, reservation_time, party_size, status, notes, created_at
            FROM reservations
            WHERE venue_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        reservations_from_models(results)
    }

    #[instrument(skip(self, reservation), fields(venue_id = %reservation.venue_id))]
    async fn insert(&self, reservation: &NewReservation) -> RepoResult<Reservation> {
        let (venue_id, reservation_time) = reservation.slot();
        let slot_conflict = || DomainError::SlotConflict {
            venue_id,
            reservation_time,
        };
        let row = ReservationInsert::new(reservation);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let taken = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM reservations
            WHERE venue_id = $1 AND reservation_time = $2
            "#,
        )
        .bind(row.venue_id)
        .bind(row.reservation_time)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if taken.is_some() {
            return Err(slot_conflict());
        }

        let model = sqlx::query_as::<_, ReservationModel>(
            r#"
            INSERT INTO reservations (customer_id, venue_id, reservation_time, party_size,
                                      status, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, customer_id, venue_id, reservation_time, party_size, status, notes, created_at
            "#,
        )
        .bind(row.customer_id)
        .bind(row.venue_id)
        .bind(row.reservation_time)
        .bind(row.party_size)
        .bind(row.status)
        .bind(row.notes)
        .bind(row.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, slot_conflict))?;

        tx.commit().await.map_err(map_db_error)?;

        Reservation::try_from(model)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: ReservationId,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> RepoResult<Reservation> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // A concurrent writer that committed first leaves no row matching
        // the expected status.
        let updated = sqlx::query_as::<_, ReservationModel>(
            r#"
            UPDATE reservations
            SET status = $2
            WHERE id = $1 AND status = $3
            RETURNING id, customer_id, venue_id, reservation_time, party_size, status, notes, created_at
            "#,
        )
        .bind(id.into_inner())
        .bind(to.as_str())
        .bind(from.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(model) = updated else {
            let current: Option<String> = sqlx::query_scalar(
                r#"
                SELECT status FROM reservations
                WHERE id = $1
                "#,
            )
            .bind(id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

            let current = current.ok_or_else(|| reservation_not_found(id))?;
            let current = ReservationStatus::parse(&current)
                .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
            return Err(DomainError::InvalidTransition { from: current, to });
        };

        tx.commit().await.map_err(map_db_error)?;

        Reservation::try_from(model)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ReservationId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            DELETE FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(reservation_not_found(id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}

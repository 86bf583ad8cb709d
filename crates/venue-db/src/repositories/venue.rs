//! PostgreSQL implementation of VenueDirectory

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use venue_core::entities::Venue;
use venue_core::traits::{RepoResult, VenueDirectory};
use venue_core::value_objects::{UserId, VenueId};

use crate::models::VenueModel;

use super::error::map_db_error;

/// PostgreSQL implementation of VenueDirectory
#[derive(Clone)]
pub struct PgVenueDirectory {
    pool: PgPool,
}

impl PgVenueDirectory {
    /// Create a new PgVenueDirectory
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueDirectory for PgVenueDirectory {
    #[instrument(skip(self))]
    async fn get_venue(&self, id: VenueId) -> RepoResult<Option<Venue>> {
        let result = sqlx::query_as::<_, VenueModel>(
            r#"
            SELECT id, owner_id, name
            FROM venues
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Venue::from))
    }

    #[instrument(skip(self))]
    async fn list_venues_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<VenueId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM venues
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(VenueId::new).collect())
    }
}

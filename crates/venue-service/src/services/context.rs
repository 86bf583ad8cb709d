//! Service context - dependency container for services
//!
//! Holds the reservation store, the venue directory, the clock and the
//! identity resolver used by the reservation engine.

use std::sync::Arc;

use tracing::info;
use venue_common::{AppConfig, JwtService};
use venue_core::traits::{
    Clock, IdentityResolver, ReservationRepository, SystemClock, VenueDirectory,
};
use venue_core::DomainError;
use venue_db::{
    create_pool, run_migrations, DatabaseConfig, InMemoryStore, PgPool, PgReservationRepository,
    PgVenueDirectory,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    reservation_repo: Arc<dyn ReservationRepository>,
    venue_directory: Arc<dyn VenueDirectory>,
    clock: Arc<dyn Clock>,
    identity_resolver: Option<Arc<dyn IdentityResolver>>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        reservation_repo: Arc<dyn ReservationRepository>,
        venue_directory: Arc<dyn VenueDirectory>,
        clock: Arc<dyn Clock>,
        identity_resolver: Option<Arc<dyn IdentityResolver>>,
    ) -> Self {
        Self {
            reservation_repo,
            venue_directory,
            clock,
            identity_resolver,
        }
    }

    /// Connect to PostgreSQL, apply migrations and wire the JWT resolver
    ///
    /// # Errors
    /// Returns a store failure if the pool cannot be created or the
    /// migrations do not apply
    pub async fn connect(config: &AppConfig) -> ServiceResult<Self> {
        let pool = create_pool(&DatabaseConfig::from_app_config(&config.database))
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
        run_migrations(&pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_expiry);

        info!(app = %config.app.name, env = ?config.app.env, "Service context ready");

        ServiceContextBuilder::new()
            .postgres(pool)
            .identity_resolver(Arc::new(jwt))
            .build()
    }

    // === Repositories ===

    /// Get the reservation repository
    pub fn reservation_repo(&self) -> &dyn ReservationRepository {
        self.reservation_repo.as_ref()
    }

    /// Get the venue directory
    pub fn venue_directory(&self) -> &dyn VenueDirectory {
        self.venue_directory.as_ref()
    }

    // === Services ===

    /// Get the clock used for "now"
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Get the identity resolver, if one is configured
    pub fn identity_resolver(&self) -> Option<&dyn IdentityResolver> {
        self.identity_resolver.as_deref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("identity_resolver", &self.identity_resolver.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    reservation_repo: Option<Arc<dyn ReservationRepository>>,
    venue_directory: Option<Arc<dyn VenueDirectory>>,
    clock: Option<Arc<dyn Clock>>,
    identity_resolver: Option<Arc<dyn IdentityResolver>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reservation_repo(mut self, repo: Arc<dyn ReservationRepository>) -> Self {
        self.reservation_repo = Some(repo);
        self
    }

    pub fn venue_directory(mut self, directory: Arc<dyn VenueDirectory>) -> Self {
        self.venue_directory = Some(directory);
        self
    }

    /// Use PostgreSQL for both the reservation store and the venue directory
    pub fn postgres(self, pool: PgPool) -> Self {
        self.reservation_repo(Arc::new(PgReservationRepository::new(pool.clone())))
            .venue_directory(Arc::new(PgVenueDirectory::new(pool)))
    }

    /// Use one shared in-memory store for reservations and venues
    pub fn in_memory(self, store: InMemoryStore) -> Self {
        self.reservation_repo(Arc::new(store.clone()))
            .venue_directory(Arc::new(store))
    }

    /// Override the clock (defaults to the system clock)
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn identity_resolver(mut self, resolver: Arc<dyn IdentityResolver>) -> Self {
        self.identity_resolver = Some(resolver);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.reservation_repo
                .ok_or_else(|| ServiceError::validation("reservation_repo is required"))?,
            self.venue_directory
                .ok_or_else(|| ServiceError::validation("venue_directory is required"))?,
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.identity_resolver,
        ))
    }
}

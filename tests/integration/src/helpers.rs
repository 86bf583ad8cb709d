//! Test helpers for integration tests
//!
//! Provides a fully wired in-memory engine with a fixed clock and a JWT
//! resolver, plus environment checks for the PostgreSQL-backed tests.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use venue_common::{try_init_tracing_with_config, AppConfig, Environment, JwtService, TracingConfig};
use venue_core::{FixedClock, Identity};
use venue_db::InMemoryStore;
use venue_service::{
    AuthorizationService, ErrorKind, ReservationService, ServiceContext, ServiceContextBuilder,
    ServiceResult,
};

use crate::fixtures::venues;

/// Secret shared by the in-memory engine and the tokens it accepts
pub const TEST_SECRET: &str = "integration-test-secret-key-0123456789";

/// "Now" for every in-memory engine
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A reservation engine over an in-memory store
pub struct TestEngine {
    pub ctx: ServiceContext,
    pub store: InMemoryStore,
    pub jwt: JwtService,
}

impl TestEngine {
    /// Start an engine seeded with the fixture venues
    pub fn start() -> Result<Self> {
        // Only the first engine in a test binary installs the subscriber
        let _ = try_init_tracing_with_config(TracingConfig::for_environment(Environment::Development));

        let store = InMemoryStore::new();
        for venue in venues() {
            store.add_venue(venue);
        }

        let jwt = JwtService::new(TEST_SECRET, 3600);
        let ctx = ServiceContextBuilder::new()
            .in_memory(store.clone())
            .clock(Arc::new(FixedClock::new(test_now())))
            .identity_resolver(Arc::new(jwt.clone()))
            .build()?;

        Ok(Self { ctx, store, jwt })
    }

    /// The reservation service bound to this engine
    pub fn reservations(&self) -> ReservationService<'_> {
        ReservationService::new(&self.ctx)
    }

    /// Issue a bearer token for an identity
    pub fn token_for(&self, identity: Identity) -> Result<String> {
        Ok(format!("Bearer {}", self.jwt.issue_token(identity)?))
    }

    /// Resolve a bearer token the way a routing layer would
    pub fn authenticate(&self, token: &str) -> ServiceResult<Identity> {
        AuthorizationService::new(&self.ctx).authenticate(token)
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    // Load from environment or use defaults
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Helper to check if the PostgreSQL test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("JWT_SECRET_KEY").is_err() {
        eprintln!("Skipping test: JWT_SECRET_KEY not set");
        return false;
    }

    true
}

/// Assert that an engine call failed with the expected kind
pub fn assert_kind<T: std::fmt::Debug>(result: ServiceResult<T>, expected: ErrorKind) -> Result<()> {
    match result {
        Err(err) if err.kind() == expected => Ok(()),
        Err(err) => anyhow::bail!(
            "Expected {expected}, got {} ({})",
            err.kind(),
            err.message()
        ),
        Ok(value) => anyhow::bail!("Expected {expected}, got success: {value:?}"),
    }
}

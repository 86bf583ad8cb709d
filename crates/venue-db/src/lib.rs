//! # venue-db
//!
//! Storage layer implementing the reservation engine's repository traits.
//!
//! ## Overview
//!
//! Two backends are provided:
//!
//! - PostgreSQL via SQLx: connection pool management, `FromRow` models,
//!   entity/model mappers and `Pg*` repositories. Slot uniqueness is enforced
//!   by a table constraint and every write runs in its own transaction.
//! - [`InMemoryStore`]: a mutex-guarded store for tests and embedded use with
//!   the same atomicity guarantees.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use venue_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use venue_db::repositories::PgReservationRepository;
//! use venue_core::traits::ReservationRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = venue_common::AppConfig::from_env()?;
//!     let pool = create_pool(&DatabaseConfig::from_app_config(&app.database)).await?;
//!     run_migrations(&pool).await?;
//!     let reservations = PgReservationRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::InMemoryStore;
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgReservationRepository, PgVenueDirectory};
